//! Small interactive page widgets: tab groups, accordions, copy buttons and lazy images.
//!
//! Each widget is a plain state type. Selection widgets keep the "exactly one active" (tabs)
//! or "at most one open" (accordion) invariant inside their own methods, so callers can only
//! express "activate item K" and never leave a group with two active members.

use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One labelled pane of a tab group.
pub struct Tab {
    /// Label shown in the tab strip (the code block language).
    pub label: String,
    /// Code shown while this tab is active.
    pub code: String,
}

#[derive(Clone, Debug)]
/// Sibling tabs of which exactly one is active.
pub struct TabGroup {
    tabs: Vec<Tab>,
    active: usize,
    /// Copy button shared by the group; it copies the active tab's code.
    pub copy: CopyFeedback,
}

impl TabGroup {
    #[must_use]
    /// Builds a group with the first tab active.
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs,
            active: 0,
            copy: CopyFeedback::default(),
        }
    }

    /// Appends another tab without changing the active one.
    pub fn push(&mut self, tab: Tab) {
        self.tabs.push(tab);
    }

    #[must_use]
    /// All tabs in display order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    #[must_use]
    /// Index of the active tab.
    pub fn active(&self) -> usize {
        self.active
    }

    #[must_use]
    /// The active tab, if the group is non-empty.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    /// Makes tab `index` the only active tab. Out-of-range indices are ignored.
    ///
    /// Returns whether the active tab changed.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() || index == self.active {
            return false;
        }
        tracing::debug!("tab {} -> {index}", self.active);
        self.active = index;
        true
    }

    #[must_use]
    /// Whether a tab with this label already exists.
    pub fn has_label(&self, label: &str) -> bool {
        self.tabs.iter().any(|t| t.label == label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A collapsible question/answer pair.
pub struct AccordionItem {
    /// Always-visible summary line.
    pub summary: String,
    /// Body text revealed while the item is open.
    pub body: String,
}

#[derive(Clone, Debug, Default)]
/// Sibling collapsible items of which at most one is open.
pub struct Accordion {
    items: Vec<AccordionItem>,
    open: Option<usize>,
}

impl Accordion {
    #[must_use]
    /// Builds a group with every item closed.
    pub fn new(items: Vec<AccordionItem>) -> Self {
        Self { items, open: None }
    }

    /// Appends another (closed) item.
    pub fn push(&mut self, item: AccordionItem) {
        self.items.push(item);
    }

    #[must_use]
    /// All items in display order.
    pub fn items(&self) -> &[AccordionItem] {
        &self.items
    }

    #[must_use]
    /// Index of the open item, if any.
    pub fn open(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    /// Whether item `index` is open.
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Toggles item `index`, closing every other item in the group.
    ///
    /// Out-of-range indices are ignored. Returns whether the item is now open.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Label state of a copy button.
pub enum CopyState {
    #[default]
    /// Ready to copy.
    Idle,
    /// The last copy succeeded; reverts at the stored instant.
    Copied {
        /// When the label goes back to idle.
        until: Instant,
    },
    /// The last copy failed; reverts at the stored instant.
    Failed {
        /// When the label goes back to idle.
        until: Instant,
    },
}

#[derive(Clone, Copy, Debug, Default)]
/// Copy button with a timed confirmation label.
pub struct CopyFeedback {
    state: CopyState,
}

impl CopyFeedback {
    /// Records the clipboard result and starts the revert window.
    pub fn finish(&mut self, copied: bool, now: Instant, window: Duration) {
        let until = now + window;
        self.state = if copied {
            CopyState::Copied { until }
        } else {
            CopyState::Failed { until }
        };
    }

    /// Reverts the label once its window has elapsed. Returns whether it reverted.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(until) if now >= until => {
                self.state = CopyState::Idle;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    /// When the current confirmation label expires.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            CopyState::Idle => None,
            CopyState::Copied { until } | CopyState::Failed { until } => Some(until),
        }
    }

    #[must_use]
    /// Current state.
    pub fn state(&self) -> CopyState {
        self.state
    }

    #[must_use]
    /// Button text for the current state.
    pub fn label(&self) -> &'static str {
        match self.state {
            CopyState::Idle => "Copy",
            CopyState::Copied { .. } => "✓ Copied",
            CopyState::Failed { .. } => "✗ Copy failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An image whose real source is only filled in once it scrolls into view.
pub struct LazyImage {
    /// Alternative text.
    pub alt: String,
    /// Deferred source taken from the page.
    pub data_src: String,
    src: Option<String>,
}

impl LazyImage {
    #[must_use]
    /// Creates an unresolved image.
    pub fn new(alt: impl Into<String>, data_src: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            data_src: data_src.into(),
            src: None,
        }
    }

    /// Copies the deferred source into the real source. Only the first call has an effect.
    ///
    /// Returns whether this call resolved the image.
    pub fn resolve(&mut self) -> bool {
        if self.src.is_some() {
            return false;
        }
        tracing::debug!("lazy image resolved: {}", self.data_src);
        self.src = Some(self.data_src.clone());
        true
    }

    #[must_use]
    /// Resolved source, if the image has been seen.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    #[must_use]
    /// Whether the image has been resolved.
    pub fn is_loaded(&self) -> bool {
        self.src.is_some()
    }
}

#[cfg(test)]
#[path = "tests/widgets.rs"]
mod tests;
