use super::{wrap, BlockRef, Renderer, Target};
use crate::document::Document;
use crate::section::{CodeBlock, ContentElement, ElementKind};
use crate::theme::Theme;
use crate::widgets::{AccordionItem, LazyImage};

fn page() -> Document {
    let mut doc = Document::new(Some("Guide".to_string()));

    let s = doc.open_section("Install");
    let section = &mut doc.sections[s];
    section.push_element(ContentElement::new(ElementKind::Heading(2), "Install"));
    section.push_element(ContentElement::new(ElementKind::Paragraph, "Run it."));
    section.push_code(CodeBlock::new("bash", "pip install tool"));

    let s = doc.open_section("FAQ");
    let section = &mut doc.sections[s];
    section.push_element(ContentElement::new(ElementKind::Heading(2), "FAQ"));
    section.push_accordion_item(AccordionItem {
        summary: "Free?".to_string(),
        body: "Yes.".to_string(),
    });
    section.push_image(LazyImage::new("diagram", "img/a.png"));

    doc
}

fn text(line: &ratatui::text::Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn test_wrap() {
    assert_eq!(wrap("one two three", 7), ["one two", "three"]);
    assert_eq!(wrap("supercalifragilistic", 5), ["supercalifragilistic"]);
    assert_eq!(wrap("", 10), [""]);
}

#[test]
fn test_layout_records_sections_and_controls() {
    let doc = page();
    let rendered = Renderer::new().render(&doc, Theme::Light, 40);

    assert_eq!(text(&rendered.lines[0]), "Guide");
    assert_eq!(rendered.section_tops[0], (0, 2));
    assert_eq!(rendered.section_top(1), Some(rendered.section_tops[1].1));
    assert_eq!(text(&rendered.lines[2]), "▾ Install");

    // Heading line folds the section
    assert_eq!(rendered.hotspot_at(2, 30), Some(Target::Fold(0)));

    // Code header: "╭ bash [Copy]"
    let at = BlockRef {
        section: 0,
        block: 2,
    };
    let (header, _) = rendered.widgets[0];
    assert_eq!(rendered.widgets[0].1, at);
    assert_eq!(text(&rendered.lines[header]), "╭ bash [Copy]");
    assert_eq!(rendered.hotspot_at(header, 7), Some(Target::Copy(at)));
    assert_eq!(rendered.hotspot_at(header, 2), None);
    assert_eq!(text(&rendered.lines[header + 1]), "│ pip install tool");
}

#[test]
fn test_accordion_and_image_lines() {
    let doc = page();
    let rendered = Renderer::new().render(&doc, Theme::Dark, 40);

    let accordion = BlockRef {
        section: 1,
        block: 1,
    };
    let (line, at) = rendered.widgets[1];
    assert_eq!(at, accordion);
    assert_eq!(text(&rendered.lines[line]), "▸ Free?");
    assert_eq!(rendered.hotspot_at(line, 0), Some(Target::Accordion(accordion, 0)));

    let (image_line, image) = rendered.images[0];
    assert_eq!(image, BlockRef { section: 1, block: 2 });
    assert_eq!(text(&rendered.lines[image_line]), "▢ diagram (loading…)");
    assert!(rendered.images_in(0..image_line).is_empty());
    assert_eq!(rendered.images_in(image_line..image_line + 1), vec![image]);
}

#[test]
fn test_open_accordion_and_resolved_image() {
    let mut doc = page();
    if let crate::section::Block::Accordion(group) = &mut doc.sections[1].blocks[1] {
        group.toggle(0);
    }
    if let crate::section::Block::Image(image) = &mut doc.sections[1].blocks[2] {
        image.resolve();
    }
    let rendered = Renderer::new().render(&doc, Theme::Light, 40);
    let all: Vec<String> = rendered.lines.iter().map(text).collect();

    assert!(all.contains(&"▾ Free?".to_string()));
    assert!(all.contains(&"  Yes.".to_string()));
    assert!(all.contains(&"▣ diagram (img/a.png)".to_string()));
}

#[test]
fn test_folded_section_shows_only_heading() {
    let mut doc = page();
    doc.sections[0].toggle_open();
    let rendered = Renderer::new().render(&doc, Theme::Light, 40);

    assert_eq!(text(&rendered.lines[2]), "▸ Install");
    let all: Vec<String> = rendered.lines.iter().map(text).collect();
    assert!(!all.iter().any(|l| l.contains("Run it.")));
    assert!(rendered.widgets.iter().all(|(_, at)| at.section != 0));
}

#[test]
fn test_hidden_sections_are_not_laid_out() {
    let mut doc = page();
    doc.sections[0].visible = false;
    let rendered = Renderer::new().render(&doc, Theme::Light, 40);

    assert_eq!(rendered.section_tops, vec![(1, 2)]);
    assert_eq!(rendered.section_top(0), None);
}

#[test]
fn test_tab_strip_hotspots() {
    let mut doc = Document::new(None);
    let s = doc.open_section("Install");
    doc.sections[s].push_code(CodeBlock::new("bash", "a"));
    doc.sections[s].push_code(CodeBlock::new("python", "b"));

    let rendered = Renderer::new().render(&doc, Theme::Light, 60);
    let (line, at) = rendered.widgets[0];

    // "╭ bash  python  [Copy]"
    assert_eq!(text(&rendered.lines[line]), "╭ bash  python  [Copy]");
    assert_eq!(rendered.hotspot_at(line, 1), Some(Target::Tab(at, 0)));
    assert_eq!(rendered.hotspot_at(line, 8), Some(Target::Tab(at, 1)));
    assert_eq!(rendered.hotspot_at(line, 17), Some(Target::Copy(at)));
    assert_eq!(text(&rendered.lines[line + 1]), "│ a");
}
