//! Incremental section search and highlighting.
//!
//! The engine never touches the page directly: it reads element text and writes visibility and
//! highlight flags through [`SectionStore`]. Keystrokes go through a [`Debouncer`] so that only
//! the query the reader settled on is evaluated.
//!
//! Matching is a case-insensitive contiguous substring test against each content element. An
//! empty query resets the page: every section shown, no element highlighted. Otherwise a section
//! stays visible only if at least one of its elements matched.

use crate::debounce::Debouncer;
use std::time::{Duration, Instant};

/// Lowercases and trims text for comparison.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The reader's current search intent, already normalised.
pub struct Query(String);

impl Query {
    #[must_use]
    /// Normalises raw input into a query.
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    #[must_use]
    /// Whether the query clears the search.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    /// Normalised query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    /// Whether `text` contains this query, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }
}

/// Read/write view of the page used by the search engine.
///
/// Sections and elements are addressed by position, mirroring document order.
pub trait SectionStore {
    /// Number of sections on the page.
    fn section_count(&self) -> usize;
    /// Number of searchable elements in `section`.
    fn element_count(&self, section: usize) -> usize;
    /// Text of one element.
    fn element_text(&self, section: usize, element: usize) -> &str;
    /// Shows or hides a section.
    fn set_visible(&mut self, section: usize, visible: bool);
    /// Marks or unmarks an element.
    fn set_highlighted(&mut self, section: usize, element: usize, highlighted: bool);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Summary of one evaluated query.
pub struct SearchOutcome {
    /// The query that was evaluated.
    pub query: Query,
    /// Sections left visible.
    pub shown_sections: usize,
    /// Elements highlighted across the page.
    pub highlighted_elements: usize,
}

impl SearchOutcome {
    #[must_use]
    /// A non-empty query that hid every section.
    pub fn is_no_results(&self) -> bool {
        !self.query.is_empty() && self.shown_sections == 0
    }
}

/// Applies `query` to every section and element of `store`.
pub fn apply_query<S: SectionStore + ?Sized>(store: &mut S, query: &Query) -> SearchOutcome {
    let mut outcome = SearchOutcome {
        query: query.clone(),
        ..SearchOutcome::default()
    };

    for section in 0..store.section_count() {
        let mut has_match = false;

        for element in 0..store.element_count(section) {
            let hit = !query.is_empty() && query.matches(store.element_text(section, element));
            store.set_highlighted(section, element, hit);
            if hit {
                has_match = true;
                outcome.highlighted_elements += 1;
            }
        }

        let shown = query.is_empty() || has_match;
        store.set_visible(section, shown);
        if shown {
            outcome.shown_sections += 1;
        }
    }

    tracing::debug!(
        "search {:?}: {} sections, {} elements",
        query.as_str(),
        outcome.shown_sections,
        outcome.highlighted_elements
    );
    outcome
}

#[derive(Debug, Default)]
/// Debounced search over a [`SectionStore`].
pub struct SearchEngine {
    debouncer: Debouncer<Query>,
    current: Query,
}

impl SearchEngine {
    #[must_use]
    /// Creates an engine evaluating input once it has been quiet for `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(window),
            current: Query::default(),
        }
    }

    /// Records a keystroke's full input value, restarting the quiet window.
    pub fn input(&mut self, raw: &str, now: Instant) {
        if self.debouncer.schedule(Query::new(raw), now) {
            tracing::trace!("search input superseded pending query");
        }
    }

    /// Evaluates the pending query if its window has elapsed.
    pub fn tick<S: SectionStore + ?Sized>(
        &mut self,
        store: &mut S,
        now: Instant,
    ) -> Option<SearchOutcome> {
        let query = self.debouncer.fire(now)?;
        Some(self.evaluate(store, query))
    }

    /// Evaluates the pending query immediately, if there is one.
    pub fn flush<S: SectionStore + ?Sized>(&mut self, store: &mut S) -> Option<SearchOutcome> {
        let query = self.debouncer.cancel()?;
        Some(self.evaluate(store, query))
    }

    /// Evaluates `raw` immediately, discarding anything pending.
    pub fn run<S: SectionStore + ?Sized>(&mut self, store: &mut S, raw: &str) -> SearchOutcome {
        self.debouncer.cancel();
        self.evaluate(store, Query::new(raw))
    }

    fn evaluate<S: SectionStore + ?Sized>(&mut self, store: &mut S, query: Query) -> SearchOutcome {
        let outcome = apply_query(store, &query);
        self.current = query;
        outcome
    }

    #[must_use]
    /// The last evaluated query.
    pub fn query(&self) -> &Query {
        &self.current
    }

    #[must_use]
    /// When the pending query becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    #[must_use]
    /// Whether a query is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
