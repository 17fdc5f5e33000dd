//! Sidebar state and scroll-driven navigation highlighting.

/// Picks the section whose top has most recently been crossed by the scroll position.
///
/// `tops` holds `(section, top line)` pairs in page order. A section counts as reached once the
/// scroll offset is within `offset` lines of its top, so a heading near the top of the viewport
/// is already active. Returns `None` above the first section.
#[must_use]
pub fn active_section(tops: &[(usize, usize)], scroll: usize, offset: usize) -> Option<usize> {
    tops.iter()
        .filter(|(_, top)| scroll >= top.saturating_sub(offset))
        .map(|(section, _)| *section)
        .last()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The section list beside the page.
///
/// On wide terminals it sits beside the content; on narrow ones it overlays the page and gets
/// out of the way whenever the reader clicks elsewhere or follows a link.
pub struct Sidebar {
    open: bool,
}

impl Sidebar {
    #[must_use]
    /// Starts open on wide terminals and closed on narrow ones.
    pub fn new(narrow: bool) -> Self {
        Self { open: !narrow }
    }

    #[must_use]
    /// Whether the sidebar is drawn.
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Menu button: opens or closes the sidebar.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        tracing::debug!("sidebar open: {}", self.open);
        self.open
    }

    /// A click landed outside the sidebar and the menu button.
    pub fn click_outside(&mut self, narrow: bool) {
        if narrow {
            self.open = false;
        }
    }

    /// A navigation link was followed.
    pub fn link_followed(&mut self, narrow: bool) {
        if narrow {
            self.open = false;
        }
    }
}

#[cfg(test)]
#[path = "tests/nav.rs"]
mod tests;
