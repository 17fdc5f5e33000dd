//! Lays the document out as styled terminal lines.
//!
//! Rendering is a pure function of the document, theme and width. Alongside the lines it
//! records where each visible section starts (for navigation highlighting), where clickable
//! controls sit (for the mouse), where interactive blocks start (for keyboard focus), and
//! where images sit (for lazy loading).

use crate::document::Document;
use crate::section::{Block, CodeBlock, ContentElement, ElementKind, Section};
use crate::theme::{Palette, Theme};
use crate::widgets::{Accordion, CopyFeedback, CopyState, LazyImage, TabGroup};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::ops::Range;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Address of one block of one section.
pub struct BlockRef {
    /// Section index.
    pub section: usize,
    /// Block index within the section.
    pub block: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a click on a control does.
pub enum Target {
    /// Fold or unfold a section.
    Fold(usize),
    /// Copy a code block or the active tab.
    Copy(BlockRef),
    /// Activate a tab.
    Tab(BlockRef, usize),
    /// Toggle an accordion item.
    Accordion(BlockRef, usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A clickable span of one rendered line.
pub struct Hotspot {
    /// Page line.
    pub line: usize,
    /// Columns covered.
    pub columns: Range<usize>,
    /// Action on click.
    pub target: Target,
}

#[derive(Debug, Default)]
/// Output of one layout pass.
pub struct RenderedPage {
    /// Styled lines, top to bottom.
    pub lines: Vec<Line<'static>>,
    /// `(section, first line)` for every visible section, in order.
    pub section_tops: Vec<(usize, usize)>,
    /// Clickable controls.
    pub hotspots: Vec<Hotspot>,
    /// First line of every code, tab and accordion block.
    pub widgets: Vec<(usize, BlockRef)>,
    /// Line of every image.
    pub images: Vec<(usize, BlockRef)>,
}

impl RenderedPage {
    #[must_use]
    /// Number of lines.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    /// Control under a page position.
    pub fn hotspot_at(&self, line: usize, column: usize) -> Option<Target> {
        self.hotspots
            .iter()
            .find(|h| h.line == line && h.columns.contains(&column))
            .map(|h| h.target)
    }

    #[must_use]
    /// First interactive block starting within `lines`.
    pub fn focused_widget(&self, lines: Range<usize>) -> Option<BlockRef> {
        self.widgets
            .iter()
            .find(|(line, _)| lines.contains(line))
            .map(|(_, block)| *block)
    }

    #[must_use]
    /// Images whose line falls within `lines`.
    pub fn images_in(&self, lines: Range<usize>) -> Vec<BlockRef> {
        self.images
            .iter()
            .filter(|(line, _)| lines.contains(line))
            .map(|(_, block)| *block)
            .collect()
    }

    #[must_use]
    /// First line of a section, if it is visible.
    pub fn section_top(&self, section: usize) -> Option<usize> {
        self.section_tops
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, top)| *top)
    }
}

/// Greedy word wrap to `width` columns. Over-long words get a line of their own.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Holds the syntax definitions and themes used to colour code blocks.
pub struct Renderer {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    #[must_use]
    /// Loads the bundled syntax definitions and themes.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    #[must_use]
    /// Lays out every visible section of `doc` at `width` columns.
    pub fn render(&self, doc: &Document, theme: Theme, width: usize) -> RenderedPage {
        let mut out = PageWriter {
            renderer: self,
            palette: theme.palette(),
            width: width.max(8),
            page: RenderedPage::default(),
        };

        if let Some(title) = &doc.title {
            let style = Style::default()
                .fg(out.palette.primary)
                .add_modifier(Modifier::BOLD);
            for line in wrap(title, out.width) {
                out.push(Line::from(Span::styled(line, style)));
            }
            out.blank();
        }

        for (index, section) in doc.sections.iter().enumerate() {
            if section.visible {
                out.section(index, section);
            }
        }

        out.page
    }

    fn highlight_code(
        &self,
        code: &str,
        language: &str,
        palette: Palette,
    ) -> Vec<Vec<Span<'static>>> {
        let plain = || -> Vec<Vec<Span<'static>>> {
            code.lines()
                .map(|l| {
                    vec![Span::styled(
                        l.to_string(),
                        Style::default()
                            .fg(palette.foreground)
                            .bg(palette.code_background),
                    )]
                })
                .collect()
        };

        let Some(theme) = self.themes.themes.get(palette.syntax_theme) else {
            return plain();
        };
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let Ok(ranges) = highlighter.highlight_line(line, &self.syntaxes) else {
                return plain();
            };
            lines.push(
                ranges
                    .into_iter()
                    .map(|(style, text)| {
                        let fg = style.foreground;
                        Span::styled(
                            text.trim_end_matches('\n').to_string(),
                            Style::default()
                                .fg(Color::Rgb(fg.r, fg.g, fg.b))
                                .bg(palette.code_background),
                        )
                    })
                    .collect(),
            );
        }
        lines
    }
}

struct PageWriter<'r> {
    renderer: &'r Renderer,
    palette: Palette,
    width: usize,
    page: RenderedPage,
}

impl PageWriter<'_> {
    fn line_no(&self) -> usize {
        self.page.lines.len()
    }

    fn push(&mut self, line: Line<'static>) {
        self.page.lines.push(line);
    }

    fn blank(&mut self) {
        self.push(Line::default());
    }

    fn hotspot(&mut self, columns: Range<usize>, target: Target) {
        let line = self.line_no();
        self.page.hotspots.push(Hotspot {
            line,
            columns,
            target,
        });
    }

    fn text_style(&self, element: &ContentElement) -> Style {
        let style = match element.kind {
            ElementKind::Heading(_) => Style::default()
                .fg(self.palette.primary)
                .add_modifier(Modifier::BOLD),
            ElementKind::Paragraph | ElementKind::ListItem => {
                Style::default().fg(self.palette.foreground)
            }
        };
        if element.highlighted {
            style.bg(self.palette.highlight)
        } else {
            style
        }
    }

    fn section(&mut self, index: usize, section: &Section) {
        self.page.section_tops.push((index, self.line_no()));

        let mut blocks = section.blocks.iter().enumerate().peekable();

        // The section heading doubles as its fold control.
        let headed = matches!(blocks.peek(), Some((_, Block::Element(0))))
            && matches!(
                section.elements.first().map(|e| e.kind),
                Some(ElementKind::Heading(_))
            );
        if headed {
            blocks.next();
            let heading = &section.elements[0];
            let marker = if section.open { "▾ " } else { "▸ " };
            let style = self.text_style(heading);
            let mut first = true;
            for line in wrap(&heading.text, self.width.saturating_sub(2)) {
                let prefix = if first { marker } else { "  " };
                if first {
                    self.hotspot(0..self.width, Target::Fold(index));
                }
                first = false;
                self.push(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(self.palette.muted)),
                    Span::styled(line, style),
                ]));
            }
            self.blank();
        }

        if !section.open {
            return;
        }

        for (i, block) in blocks {
            let at = BlockRef {
                section: index,
                block: i,
            };
            match block {
                Block::Element(e) => self.element(&section.elements[*e]),
                Block::Code(code) => self.code(at, code),
                Block::Tabs(group) => self.tabs(at, group),
                Block::Accordion(group) => self.accordion(at, group),
                Block::Image(image) => self.image(at, image),
            }
            self.blank();
        }
    }

    fn element(&mut self, element: &ContentElement) {
        let style = self.text_style(element);
        let (first, rest) = match element.kind {
            ElementKind::ListItem => ("  • ", "    "),
            ElementKind::Heading(_) | ElementKind::Paragraph => ("", ""),
        };

        let lines = wrap(&element.text, self.width.saturating_sub(first.chars().count()));
        for (i, line) in lines.into_iter().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            self.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(self.palette.muted)),
                Span::styled(line, style),
            ]));
        }
    }

    fn copy_button(&mut self, spans: &mut Vec<Span<'static>>, at: BlockRef, copy: &CopyFeedback) {
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let label = format!("[{}]", copy.label());
        let colour = match copy.state() {
            CopyState::Idle => self.palette.muted,
            CopyState::Copied { .. } => self.palette.success,
            CopyState::Failed { .. } => self.palette.danger,
        };
        let start = used + 1;
        self.hotspot(start..start + label.chars().count(), Target::Copy(at));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, Style::default().fg(colour)));
    }

    fn code_body(&mut self, code: &str, language: &str) {
        let gutter = Style::default().fg(self.palette.muted);
        for spans in self.renderer.highlight_code(code, language, self.palette) {
            let mut line = vec![Span::styled("│ ", gutter)];
            line.extend(spans);
            self.push(Line::from(line));
        }
    }

    fn code(&mut self, at: BlockRef, code: &CodeBlock) {
        self.page.widgets.push((self.line_no(), at));

        let label = if code.language.is_empty() {
            "code".to_string()
        } else {
            code.language.clone()
        };
        let mut header = vec![Span::styled(
            format!("╭ {label}"),
            Style::default().fg(self.palette.muted),
        )];
        self.copy_button(&mut header, at, &code.copy);
        self.push(Line::from(header));
        self.code_body(&code.code, &code.language);
    }

    fn tabs(&mut self, at: BlockRef, group: &TabGroup) {
        self.page.widgets.push((self.line_no(), at));

        let mut header = vec![Span::styled("╭", Style::default().fg(self.palette.muted))];
        let mut column = 1;
        for (k, tab) in group.tabs().iter().enumerate() {
            let label = format!(" {} ", tab.label);
            let width = label.chars().count();
            let style = if k == group.active() {
                Style::default()
                    .fg(self.palette.primary)
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default().fg(self.palette.muted)
            };
            self.hotspot(column..column + width, Target::Tab(at, k));
            header.push(Span::styled(label, style));
            column += width;
        }
        self.copy_button(&mut header, at, &group.copy);
        self.push(Line::from(header));

        if let Some(tab) = group.active_tab() {
            self.code_body(&tab.code, &tab.label);
        }
    }

    fn accordion(&mut self, at: BlockRef, group: &Accordion) {
        self.page.widgets.push((self.line_no(), at));

        for (k, item) in group.items().iter().enumerate() {
            let open = group.is_open(k);
            let marker = if open { "▾ " } else { "▸ " };
            self.hotspot(0..self.width, Target::Accordion(at, k));
            self.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(self.palette.primary)),
                Span::styled(
                    item.summary.clone(),
                    Style::default()
                        .fg(self.palette.foreground)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            if open {
                for line in wrap(&item.body, self.width.saturating_sub(2)) {
                    self.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(line, Style::default().fg(self.palette.foreground)),
                    ]));
                }
            }
        }
    }

    fn image(&mut self, at: BlockRef, image: &LazyImage) {
        self.page.images.push((self.line_no(), at));
        let text = match image.src() {
            Some(src) => format!("▣ {} ({src})", image.alt),
            None => format!("▢ {} (loading…)", image.alt),
        };
        self.push(Line::from(Span::styled(
            text,
            Style::default().fg(self.palette.muted),
        )));
    }
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
