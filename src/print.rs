//! Plain-text print output of the page as currently shown.
//!
//! Like a browser printing the live page, hidden sections and folded bodies are left out,
//! tab groups print their active tab and accordions print only open bodies.

use crate::document::Document;
use crate::error::Result;
use crate::page::wrap;
use crate::search::{apply_query, Query, SearchOutcome};
use crate::section::{Block, ElementKind};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders the visible page as plain text wrapped at `width`.
#[must_use]
pub fn plain_text(doc: &Document, width: usize) -> String {
    let mut out = String::new();

    if let Some(title) = &doc.title {
        let _ = writeln!(out, "{title}\n{}\n", "=".repeat(title.chars().count()));
    }

    for section in doc.sections.iter().filter(|s| s.visible) {
        for (i, block) in section.blocks.iter().enumerate() {
            if i > 0 && !section.open {
                break;
            }
            match block {
                Block::Element(e) => {
                    let element = &section.elements[*e];
                    match element.kind {
                        ElementKind::Heading(level) => {
                            let _ = writeln!(out, "{} {}", "#".repeat(level), element.text);
                        }
                        ElementKind::Paragraph => {
                            for line in wrap(&element.text, width) {
                                let _ = writeln!(out, "{line}");
                            }
                        }
                        ElementKind::ListItem => {
                            for (n, line) in wrap(&element.text, width.saturating_sub(2))
                                .into_iter()
                                .enumerate()
                            {
                                let bullet = if n == 0 { "- " } else { "  " };
                                let _ = writeln!(out, "{bullet}{line}");
                            }
                        }
                    }
                }
                Block::Code(code) => {
                    let _ = writeln!(out, "```{}\n{}\n```", code.language, code.code);
                }
                Block::Tabs(group) => {
                    if let Some(tab) = group.active_tab() {
                        let _ = writeln!(out, "```{}\n{}\n```", tab.label, tab.code);
                    }
                }
                Block::Accordion(group) => {
                    for (k, item) in group.items().iter().enumerate() {
                        let _ = writeln!(out, "> {}", item.summary);
                        if group.is_open(k) {
                            for line in wrap(&item.body, width.saturating_sub(2)) {
                                let _ = writeln!(out, "  {line}");
                            }
                        }
                    }
                }
                Block::Image(image) => {
                    let _ = writeln!(out, "[image: {}]", image.alt);
                }
            }
            out.push('\n');
        }
    }

    out
}

/// Applies `query` to the page and renders what remains visible.
///
/// A query matching nothing leaves only the title; the outcome says so.
#[must_use]
pub fn search_text(doc: &mut Document, query: &str, width: usize) -> (String, SearchOutcome) {
    let outcome = apply_query(doc, &Query::new(query));
    if outcome.is_no_results() {
        tracing::warn!("no sections match {:?}", outcome.query.as_str());
    }
    (plain_text(doc, width), outcome)
}

/// Writes the print output for the page at `source` into `dir`, named after the page.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn print_to(doc: &Document, source: &Path, dir: &Path, width: usize) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .map_or_else(|| "page".into(), |s| s.to_string_lossy());
    let target = dir.join(format!("{stem}.txt"));
    fs::write(&target, plain_text(doc, width))?;
    tracing::info!("printed to {}", target.display());
    Ok(target)
}

#[cfg(test)]
#[path = "tests/print.rs"]
mod tests;
