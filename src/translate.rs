//! Initialisation contract of the embedded page-translation widget.
//!
//! The widget itself is opaque: its loader calls a named callback, which constructs the widget
//! inside a container element with the options below. `docview --translate-options` prints the
//! contract as JSON for pages that embed the widget.

use serde::Serialize;

/// Callback name the widget loader invokes.
pub const INIT_CALLBACK: &str = "googleTranslateElementInit";

/// Element id the widget renders into.
pub const CONTAINER_ID: &str = "google_translate_element";

/// Source language of the page.
pub const PAGE_LANGUAGE: &str = "en";

/// Target languages offered to the reader.
pub const INCLUDED_LANGUAGES: [&str; 37] = [
    "ar", "en", "es", "fr", "de", "it", "pt", "ru", "zh-CN", "ja", "ko", "hi", "tr", "nl", "pl",
    "sv", "no", "da", "fi", "cs", "el", "he", "id", "th", "vi", "uk", "ro", "hu", "bg", "hr", "sk",
    "sl", "lt", "lv", "et", "ms", "fil",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Visual layout of the language picker.
pub enum Layout {
    #[default]
    /// Compact single dropdown.
    Simple,
    /// Horizontal inline layout.
    Horizontal,
    /// Vertical inline layout.
    Vertical,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Options passed to the widget constructor.
pub struct TranslateOptions {
    /// Language the page is written in.
    pub page_language: String,
    /// Comma-separated allow-list of target languages.
    pub included_languages: String,
    /// Picker layout.
    pub layout: Layout,
    /// Whether the widget shows its banner before the reader asks for it.
    pub auto_display: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            page_language: PAGE_LANGUAGE.to_string(),
            included_languages: INCLUDED_LANGUAGES.join(","),
            layout: Layout::Simple,
            auto_display: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Everything a page needs to wire the widget up.
pub struct WidgetInit {
    /// Callback name the loader invokes.
    pub callback: &'static str,
    /// Container element id.
    pub container: &'static str,
    /// Constructor options.
    pub options: TranslateOptions,
}

impl Default for WidgetInit {
    fn default() -> Self {
        Self {
            callback: INIT_CALLBACK,
            container: CONTAINER_ID,
            options: TranslateOptions::default(),
        }
    }
}

impl WidgetInit {
    #[must_use]
    /// The default contract with the picker drawn in `layout`.
    pub fn with_layout(layout: Layout) -> Self {
        let mut init = Self::default();
        init.options.layout = layout;
        init
    }

    /// Pretty-printed JSON of the init contract.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "tests/translate.rs"]
mod tests;
