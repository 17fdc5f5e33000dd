//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a docview.toml, and if present we load settings from there.
//! This provides wrapping width, timing windows, scroll thresholds and file locations.

use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "docview.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from docview.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum line width for wrapped page text.
    pub wrap_width: usize,
    #[facet(default = 300)]
    /// Quiet period after the last search keystroke before the query is evaluated.
    pub debounce_ms: u64,
    #[facet(default = 2000)]
    /// How long a copy button shows its confirmation before reverting.
    pub copy_feedback_ms: u64,
    #[facet(default = 5)]
    /// Lines above a section top at which it already counts as the active section.
    pub nav_offset: usize,
    #[facet(default = 10)]
    /// Scroll offset (in lines) past which the scroll-to-top button appears.
    pub scroll_top_after: usize,
    #[facet(default = 80)]
    /// Terminal widths at or below this use the narrow (overlay sidebar) layout.
    pub narrow_width: u16,
    #[facet(default = true)]
    /// Animate jumps to sections and to the top instead of snapping.
    pub smooth_scroll: bool,
    #[facet(default = ".docview-state.json".to_string())]
    /// Key-value file holding the persisted theme preference.
    pub state_file: String,
    #[facet(default = ".".to_string())]
    /// Directory that print output is written into.
    pub print_dir: String,
}

impl Config {
    #[must_use]
    /// Load configuration from docview.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from an explicit path, falling back to defaults.
    ///
    /// A missing file is silent; a file that fails to parse is logged and ignored.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            match facet_toml::from_str::<Self>(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring {}: {e}", path.display()),
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// Search debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    /// Copy confirmation window.
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
