//! Markdown format implementation using tree-sitter-md.
//!
//! The page title is the first `#` heading; every `##` heading opens a section and deeper
//! headings become heading elements inside it. Paragraphs and list items are the searchable
//! elements. Fenced code becomes code blocks, which merge into tab groups when consecutive
//! blocks switch language, `<details>` HTML becomes accordion items, and a paragraph made only
//! of images becomes lazy images.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::{CodeBlock, ContentElement, ElementKind, Section};
use crate::widgets::{AccordionItem, LazyImage};
use tree_sitter::{Node, Parser};

/// Section title used for content that precedes the first `##` heading of an untitled page.
pub const PREAMBLE_TITLE: &str = "Overview";

/// Tree-sitter block grammar for CommonMark pages.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn extract(&self, source: &str) -> Result<Document> {
        let mut parser = Parser::new();
        parser.set_language(&self.language())?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("markdown source".to_string()))?;

        let mut builder = PageBuilder {
            source,
            doc: Document::default(),
            current: None,
        };
        builder.visit(tree.root_node());

        tracing::debug!(
            "extracted {} sections from {} bytes",
            builder.doc.sections.len(),
            source.len()
        );
        Ok(builder.doc)
    }
}

struct PageBuilder<'s> {
    source: &'s str,
    doc: Document,
    current: Option<usize>,
}

impl<'s> PageBuilder<'s> {
    fn text(&self, node: Node) -> &'s str {
        &self.source[node.byte_range()]
    }

    /// Section receiving content, opening the preamble section on first use.
    fn section(&mut self) -> &mut Section {
        let index = if let Some(index) = self.current {
            index
        } else {
            let title = self
                .doc
                .title
                .clone()
                .unwrap_or_else(|| PREAMBLE_TITLE.to_string());
            let index = self.doc.open_section(&title);
            self.current = Some(index);
            index
        };
        &mut self.doc.sections[index]
    }

    fn visit(&mut self, node: Node) {
        let mut walker = node.walk();
        let children: Vec<Node> = node.named_children(&mut walker).collect();
        for child in children {
            self.block(child);
        }
    }

    fn block(&mut self, node: Node) {
        match node.kind() {
            "document" | "section" | "block_quote" => self.visit(node),
            "atx_heading" | "setext_heading" => self.heading(node),
            "paragraph" => self.paragraph(node),
            "list" => self.list(node),
            "fenced_code_block" => self.fenced_code(node),
            "indented_code_block" => {
                let code = dedent(self.text(node), 4);
                self.section().push_code(CodeBlock::new("", code));
            }
            "html_block" => self.html(node),
            _ => {}
        }
    }

    fn heading(&mut self, node: Node) {
        let level = heading_level(node);
        let title = plain_text(&self.inline_text(node).unwrap_or_default());

        if level == 1 && self.doc.title.is_none() && self.doc.sections.is_empty() {
            self.doc.title = Some(title);
            return;
        }

        if level <= 2 {
            let index = self.doc.open_section(&title);
            self.current = Some(index);
            self.doc.sections[index]
                .push_element(ContentElement::new(ElementKind::Heading(2), title));
        } else {
            self.section()
                .push_element(ContentElement::new(ElementKind::Heading(level), title));
        }
    }

    fn paragraph(&mut self, node: Node) {
        let Some(inline) = self.inline_text(node) else {
            return;
        };

        if let Some(images) = images_only(&inline) {
            let section = self.section();
            for image in images {
                section.push_image(image);
            }
            return;
        }

        let text = plain_text(&inline);
        if !text.is_empty() {
            self.section()
                .push_element(ContentElement::new(ElementKind::Paragraph, text));
        }
    }

    fn list(&mut self, node: Node) {
        let mut walker = node.walk();
        let items: Vec<Node> = node
            .named_children(&mut walker)
            .filter(|n| n.kind() == "list_item")
            .collect();

        for item in items {
            let mut item_walker = item.walk();
            let children: Vec<Node> = item.named_children(&mut item_walker).collect();

            let text = children
                .iter()
                .filter(|c| c.kind() == "paragraph")
                .filter_map(|c| self.inline_text(*c))
                .map(|t| plain_text(&t))
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                self.section()
                    .push_element(ContentElement::new(ElementKind::ListItem, text));
            }

            for child in children {
                match child.kind() {
                    "list" => self.list(child),
                    "fenced_code_block" => self.fenced_code(child),
                    _ => {}
                }
            }
        }
    }

    fn fenced_code(&mut self, node: Node) {
        let mut language = String::new();
        let mut code = String::new();

        let mut walker = node.walk();
        for child in node.named_children(&mut walker) {
            match child.kind() {
                "info_string" => {
                    language = self
                        .text(child)
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string();
                }
                "code_fence_content" => {
                    code = self.text(child).trim_end_matches('\n').to_string();
                }
                _ => {}
            }
        }

        self.section().push_code(CodeBlock::new(language, code));
    }

    fn html(&mut self, node: Node) {
        let html = self.text(node);
        if !html.contains("<details") {
            return;
        }
        for chunk in html.split("<details").skip(1) {
            if let Some(item) = details_item(chunk) {
                self.section().push_accordion_item(item);
            }
        }
    }

    /// Inline content of a heading or paragraph, with line breaks folded to spaces.
    fn inline_text(&self, node: Node) -> Option<String> {
        let mut walker = node.walk();
        let children: Vec<Node> = node.named_children(&mut walker).collect();
        for child in children {
            match child.kind() {
                "inline" => return Some(collapse_whitespace(self.text(child))),
                "paragraph" => return self.inline_text(child),
                _ => {}
            }
        }
        None
    }
}

fn heading_level(node: Node) -> usize {
    let mut walker = node.walk();
    for child in node.children(&mut walker) {
        let kind = child.kind();
        if let Some(rest) = kind.strip_prefix("atx_h") {
            if let Some(level) = rest.strip_suffix("_marker").and_then(|d| d.parse().ok()) {
                return level;
            }
        }
        match kind {
            "setext_h1_underline" => return 1,
            "setext_h2_underline" => return 2,
            _ => {}
        }
    }
    2
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `[label](target) rest` into its parts. `s` must start at the `[`.
fn parse_link(s: &str) -> Option<(&str, &str, &str)> {
    let body = s.strip_prefix('[')?;
    let close = body.find(']')?;
    let label = &body[..close];
    let after = body[close + 1..].strip_prefix('(')?;
    let end = after.find(')')?;
    let target = after[..end].split_whitespace().next().unwrap_or_default();
    Some((label, target, &after[end + 1..]))
}

/// Reduces inline markdown to the text a reader sees.
pub(crate) fn plain_text(inline: &str) -> String {
    let mut out = String::with_capacity(inline.len());
    let mut rest = inline;

    while let Some(open) = rest.find('[') {
        let (before, from_bracket) = rest.split_at(open);
        if let Some((label, _, tail)) = parse_link(from_bracket) {
            out.push_str(before.strip_suffix('!').unwrap_or(before));
            out.push_str(label);
            rest = tail;
        } else {
            out.push_str(before);
            out.push('[');
            rest = &from_bracket[1..];
        }
    }
    out.push_str(rest);

    collapse_whitespace(&out.replace(['`', '*'], ""))
}

/// Images of a paragraph that contains nothing but images.
fn images_only(inline: &str) -> Option<Vec<LazyImage>> {
    let mut images = Vec::new();
    let mut rest = inline.trim_start();

    while !rest.is_empty() {
        let (alt, src, tail) = parse_link(rest.strip_prefix('!')?)?;
        images.push(LazyImage::new(alt, src));
        rest = tail.trim_start();
    }

    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

/// Parses the text following a `<details` opener.
fn details_item(chunk: &str) -> Option<AccordionItem> {
    const OPEN: &str = "<summary>";
    const CLOSE: &str = "</summary>";

    let start = chunk.find(OPEN)? + OPEN.len();
    let end = start + chunk[start..].find(CLOSE)?;
    let body = &chunk[end + CLOSE.len()..];
    let body = body.split("</details>").next().unwrap_or(body);

    Some(AccordionItem {
        summary: strip_tags(&chunk[start..end]),
        body: strip_tags(body),
    })
}

fn dedent(code: &str, width: usize) -> String {
    code.trim_end_matches('\n')
        .lines()
        .map(|line| {
            let indent = line.len() - line.trim_start_matches(' ').len();
            &line[indent.min(width)..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
