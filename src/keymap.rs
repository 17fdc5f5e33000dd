//! Global keyboard shortcuts.
//!
//! Shortcuts are checked before any other key handling; a matched key is consumed so it never
//! reaches the search box or the page bindings.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Actions reachable from anywhere in the viewer.
pub enum Shortcut {
    /// Alt+s: move focus to the search box.
    FocusSearch,
    /// Alt+t: flip between light and dark.
    ToggleTheme,
    /// Ctrl+p or Cmd+p: print the page.
    Print,
}

impl Shortcut {
    #[must_use]
    /// Matches a key press against the shortcut table.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let KeyCode::Char(c) = key.code else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::ALT) {
            return match c {
                's' => Some(Self::FocusSearch),
                't' => Some(Self::ToggleTheme),
                _ => None,
            };
        }

        if c == 'p'
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::SUPER))
        {
            return Some(Self::Print);
        }

        None
    }

    #[must_use]
    /// Key combination shown in help text.
    pub fn keys(self) -> &'static str {
        match self {
            Self::FocusSearch => "Alt+S",
            Self::ToggleTheme => "Alt+T",
            Self::Print => "Ctrl/Cmd+P",
        }
    }

    #[must_use]
    /// What the shortcut does.
    pub fn description(self) -> &'static str {
        match self {
            Self::FocusSearch => "focus search",
            Self::ToggleTheme => "toggle light/dark theme",
            Self::Print => "print the page",
        }
    }

    /// Every shortcut, in help order.
    pub const ALL: [Self; 3] = [Self::FocusSearch, Self::ToggleTheme, Self::Print];
}

#[cfg(test)]
#[path = "tests/keymap.rs"]
mod tests;
