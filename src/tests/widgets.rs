use super::{Accordion, AccordionItem, CopyFeedback, CopyState, LazyImage, Tab, TabGroup};
use std::time::{Duration, Instant};

fn tab(label: &str) -> Tab {
    Tab {
        label: label.to_string(),
        code: format!("{label} code"),
    }
}

fn item(summary: &str) -> AccordionItem {
    AccordionItem {
        summary: summary.to_string(),
        body: format!("{summary} answer"),
    }
}

#[test]
fn test_first_tab_starts_active() {
    let group = TabGroup::new(vec![tab("bash"), tab("python")]);
    assert_eq!(group.active(), 0);
    assert_eq!(group.active_tab().unwrap().label, "bash");
}

#[test]
fn test_activate_switches_the_single_active_tab() {
    let mut group = TabGroup::new(vec![tab("bash"), tab("python"), tab("rust")]);

    assert!(group.activate(2));
    assert_eq!(group.active(), 2);
    assert_eq!(group.active_tab().unwrap().code, "rust code");

    // Re-activating the active tab is a no-op
    assert!(!group.activate(2));
    assert_eq!(group.active(), 2);
}

#[test]
fn test_activate_out_of_range_is_ignored() {
    let mut group = TabGroup::new(vec![tab("bash"), tab("python")]);
    assert!(!group.activate(5));
    assert_eq!(group.active(), 0);
}

#[test]
fn test_has_label() {
    let mut group = TabGroup::new(vec![tab("bash")]);
    group.push(tab("python"));
    assert!(group.has_label("python"));
    assert!(!group.has_label("go"));
    assert_eq!(group.tabs().len(), 2);
}

#[test]
fn test_accordion_starts_closed() {
    let group = Accordion::new(vec![item("Q1"), item("Q2")]);
    assert_eq!(group.open(), None);
    assert!(!group.is_open(0));
}

#[test]
fn test_accordion_opening_one_closes_the_other() {
    let mut group = Accordion::new(vec![item("Q1"), item("Q2"), item("Q3")]);

    assert!(group.toggle(0));
    assert!(group.is_open(0));

    assert!(group.toggle(2));
    assert!(group.is_open(2));
    assert!(!group.is_open(0));
    assert_eq!(group.open(), Some(2));
}

#[test]
fn test_accordion_toggle_open_item_closes_it() {
    let mut group = Accordion::new(vec![item("Q1"), item("Q2")]);
    group.toggle(1);
    assert!(!group.toggle(1));
    assert_eq!(group.open(), None);
}

#[test]
fn test_accordion_out_of_range_is_ignored() {
    let mut group = Accordion::new(vec![item("Q1")]);
    group.toggle(0);
    assert!(!group.toggle(3));
    assert!(group.is_open(0));
}

#[test]
fn test_copy_feedback_reverts_after_window() {
    let start = Instant::now();
    let window = Duration::from_secs(2);
    let mut copy = CopyFeedback::default();
    assert_eq!(copy.label(), "Copy");

    copy.finish(true, start, window);
    assert_eq!(copy.label(), "✓ Copied");
    assert_eq!(copy.deadline(), Some(start + window));

    assert!(!copy.tick(start + Duration::from_millis(1999)));
    assert_eq!(copy.label(), "✓ Copied");

    assert!(copy.tick(start + window));
    assert_eq!(copy.state(), CopyState::Idle);
    assert_eq!(copy.deadline(), None);
}

#[test]
fn test_copy_failure_has_its_own_label() {
    let start = Instant::now();
    let mut copy = CopyFeedback::default();
    copy.finish(false, start, Duration::from_secs(2));
    assert_eq!(copy.label(), "✗ Copy failed");
    assert!(matches!(copy.state(), CopyState::Failed { .. }));
}

#[test]
fn test_second_copy_restarts_window() {
    let start = Instant::now();
    let window = Duration::from_secs(2);
    let mut copy = CopyFeedback::default();
    copy.finish(true, start, window);
    copy.finish(true, start + Duration::from_secs(1), window);

    assert!(!copy.tick(start + window));
    assert!(copy.tick(start + Duration::from_secs(3)));
}

#[test]
fn test_lazy_image_resolves_once() {
    let mut image = LazyImage::new("diagram", "img/arch.png");
    assert!(!image.is_loaded());
    assert_eq!(image.src(), None);

    assert!(image.resolve());
    assert_eq!(image.src(), Some("img/arch.png"));

    // Later changes to the deferred source are not picked up
    image.data_src = "img/other.png".to_string();
    assert!(!image.resolve());
    assert_eq!(image.src(), Some("img/arch.png"));
}
