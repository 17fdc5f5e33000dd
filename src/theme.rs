//! Light/dark theme selection, persistence and palettes.
//!
//! The theme is a two-state flip persisted under a single preference key. An absent or
//! unrecognised stored value means light.

use crate::prefs::PreferenceStore;
use ratatui::style::Color;
use std::fmt;

/// Preference key the theme is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// The two page themes.
pub enum Theme {
    #[default]
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    #[must_use]
    /// Parses a stored value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    /// Stored value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    /// Toggle button icon: the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    #[must_use]
    /// Colours for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::Rgb(255, 255, 255),
                foreground: Color::Rgb(30, 41, 59),
                muted: Color::Rgb(100, 116, 139),
                primary: Color::Rgb(59, 130, 246),
                highlight: Color::Rgb(219, 234, 254),
                success: Color::Rgb(34, 197, 94),
                danger: Color::Rgb(220, 38, 38),
                code_background: Color::Rgb(241, 245, 249),
                syntax_theme: "InspiredGitHub",
            },
            Self::Dark => Palette {
                background: Color::Rgb(15, 23, 42),
                foreground: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(148, 163, 184),
                primary: Color::Rgb(96, 165, 250),
                highlight: Color::Rgb(30, 58, 138),
                success: Color::Rgb(34, 197, 94),
                danger: Color::Rgb(248, 113, 113),
                code_background: Color::Rgb(30, 41, 59),
                syntax_theme: "base16-ocean.dark",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Colours used to draw the page under one theme.
pub struct Palette {
    /// Page background.
    pub background: Color,
    /// Body text.
    pub foreground: Color,
    /// Secondary text and borders.
    pub muted: Color,
    /// Accent for headings, active links and the progress bar.
    pub primary: Color,
    /// Background of search matches.
    pub highlight: Color,
    /// Copy confirmation.
    pub success: Color,
    /// Copy failure and no-results notices.
    pub danger: Color,
    /// Background behind code blocks.
    pub code_background: Color,
    /// Name of the syntect theme for code blocks.
    pub syntax_theme: &'static str,
}

/// Current theme bound to the store it persists to.
pub struct ThemeSwitcher {
    store: Box<dyn PreferenceStore>,
    current: Theme,
}

impl ThemeSwitcher {
    #[must_use]
    /// Reads the stored theme, defaulting to light.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let current = store
            .get(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default();
        tracing::debug!("theme loaded: {current}");
        Self { store, current }
    }

    #[must_use]
    /// The applied theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and persists it.
    ///
    /// Persistence is best-effort: a failed write is logged and the new theme still applies.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.current.as_str()) {
            tracing::warn!("could not persist theme: {e}");
        }
        tracing::info!("theme: {}", self.current);
        self.current
    }

    #[must_use]
    /// Releases the backing store, e.g. to reload from it.
    pub fn into_store(self) -> Box<dyn PreferenceStore> {
        self.store
    }
}

#[cfg(test)]
#[path = "tests/theme.rs"]
mod tests;
