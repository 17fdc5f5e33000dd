//! Section representation for a parsed documentation page.
//!
//! A section is the unit the reader navigates and the search filters: it corresponds to a
//! level-two heading and everything up to the next one. Its searchable text lives in content
//! elements; code blocks, tabs, accordions and images sit alongside them as blocks so the
//! page can be rendered in source order.

use crate::widgets::{Accordion, CopyFeedback, LazyImage, TabGroup};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What kind of page element a piece of searchable text came from.
pub enum ElementKind {
    /// A heading with its level (2 for the section heading itself).
    Heading(usize),
    /// A paragraph of prose.
    Paragraph,
    /// A single list item.
    ListItem,
}

#[derive(Clone, Debug)]
/// A leaf of searchable text owned by its section.
pub struct ContentElement {
    /// Element kind, used for styling.
    pub kind: ElementKind,
    /// Plain text with inline markup removed.
    pub text: String,
    /// Set while the current search matches this element.
    pub highlighted: bool,
}

impl ContentElement {
    #[must_use]
    /// Creates an unhighlighted element.
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            highlighted: false,
        }
    }
}

#[derive(Clone, Debug)]
/// A fenced code block with its copy button.
pub struct CodeBlock {
    /// Info-string language, empty when none was given.
    pub language: String,
    /// Code without the fences.
    pub code: String,
    /// Copy button state.
    pub copy: CopyFeedback,
}

impl CodeBlock {
    #[must_use]
    /// Creates a code block with an idle copy button.
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
            copy: CopyFeedback::default(),
        }
    }
}

#[derive(Clone, Debug)]
/// One renderable unit of a section body, in source order.
pub enum Block {
    /// Index into the section's `elements`.
    Element(usize),
    /// A standalone code block.
    Code(CodeBlock),
    /// Consecutive code blocks in different languages.
    Tabs(TabGroup),
    /// Consecutive collapsible items.
    Accordion(Accordion),
    /// A deferred image.
    Image(LazyImage),
}

#[derive(Clone, Debug)]
/// Hierarchical document division shown, hidden, highlighted and folded as a unit.
pub struct Section {
    /// Stable anchor derived from the heading.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Searchable text in source order.
    pub elements: Vec<ContentElement>,
    /// Renderable units in source order.
    pub blocks: Vec<Block>,
    /// Cleared when a search matches nothing in this section.
    pub visible: bool,
    /// Set while the scroll position lies within this section.
    pub active: bool,
    /// Cleared while the section is folded down to its heading.
    pub open: bool,
}

impl Section {
    #[must_use]
    /// Creates an empty, visible, unfolded section.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            elements: Vec::new(),
            blocks: Vec::new(),
            visible: true,
            active: false,
            open: true,
        }
    }

    /// Adds a searchable element and its block.
    pub fn push_element(&mut self, element: ContentElement) {
        self.elements.push(element);
        self.blocks.push(Block::Element(self.elements.len() - 1));
    }

    /// Adds a code block, merging it into a tab group when it directly follows a block in a
    /// different language.
    pub fn push_code(&mut self, code: CodeBlock) {
        use crate::widgets::Tab;

        let tab = |c: &CodeBlock| Tab {
            label: c.language.clone(),
            code: c.code.clone(),
        };

        if code.language.is_empty() {
            self.blocks.push(Block::Code(code));
            return;
        }

        if let Some(Block::Code(prev)) = self.blocks.last() {
            if !prev.language.is_empty() && prev.language != code.language {
                let group = TabGroup::new(vec![tab(prev), tab(&code)]);
                self.blocks.pop();
                self.blocks.push(Block::Tabs(group));
                return;
            }
        }

        if let Some(Block::Tabs(group)) = self.blocks.last_mut() {
            if !group.has_label(&code.language) {
                group.push(tab(&code));
                return;
            }
        }

        self.blocks.push(Block::Code(code));
    }

    /// Adds a collapsible item, joining a directly preceding accordion group.
    pub fn push_accordion_item(&mut self, item: crate::widgets::AccordionItem) {
        if let Some(Block::Accordion(group)) = self.blocks.last_mut() {
            group.push(item);
        } else {
            self.blocks.push(Block::Accordion(Accordion::new(vec![item])));
        }
    }

    /// Adds a deferred image.
    pub fn push_image(&mut self, image: LazyImage) {
        self.blocks.push(Block::Image(image));
    }

    /// Folds or unfolds the section body. Returns whether it is now open.
    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    #[must_use]
    /// Whether any element is currently highlighted.
    pub fn has_highlight(&self) -> bool {
        self.elements.iter().any(|e| e.highlighted)
    }
}
