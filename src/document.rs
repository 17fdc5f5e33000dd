//! The loaded page: a title and its sections.
//!
//! `Document` is the concrete [`SectionStore`] the viewer searches. Anchors are derived from
//! section titles and kept unique within the page.

use crate::search::SectionStore;
use crate::section::Section;
use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
/// A parsed documentation page.
pub struct Document {
    /// Top-level (`#`) heading, if the page has one.
    pub title: Option<String>,
    /// Sections in page order.
    pub sections: Vec<Section>,
    ids: HashSet<String>,
}

impl Document {
    #[must_use]
    /// Creates an empty page.
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            sections: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Opens a new section titled `title` with a unique anchor, returning its index.
    pub fn open_section(&mut self, title: &str) -> usize {
        let base = slugify(title);
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };

        let mut id = base.clone();
        let mut n = 1;
        while self.ids.contains(&id) {
            id = format!("{base}-{n}");
            n += 1;
        }

        self.ids.insert(id.clone());
        self.sections.push(Section::new(id, title));
        self.sections.len() - 1
    }

    #[must_use]
    /// Indices of sections currently shown.
    pub fn visible_sections(&self) -> Vec<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Marks exactly `active` (or nothing) as the active section.
    pub fn set_active(&mut self, active: Option<usize>) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.active = Some(i) == active;
        }
    }

    #[must_use]
    /// Index of the active section.
    pub fn active(&self) -> Option<usize> {
        self.sections.iter().position(|s| s.active)
    }
}

impl SectionStore for Document {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn element_count(&self, section: usize) -> usize {
        self.sections[section].elements.len()
    }

    fn element_text(&self, section: usize, element: usize) -> &str {
        &self.sections[section].elements[element].text
    }

    fn set_visible(&mut self, section: usize, visible: bool) {
        self.sections[section].visible = visible;
    }

    fn set_highlighted(&mut self, section: usize, element: usize, highlighted: bool) {
        self.sections[section].elements[element].highlighted = highlighted;
    }
}

/// Turns a heading into an anchor: lowercase alphanumerics joined by single hyphens.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
