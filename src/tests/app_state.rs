use super::{AppState, Flow, Focus, IDLE_WAIT};
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::prefs::MemoryStore;
use crate::section::Block;
use crate::theme::{Theme, ThemeSwitcher};
use crate::ui;
use crate::viewport::FRAME;
use crate::widgets::CopyState;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const PAGE: &str = "# Guide

Welcome to the guide.

## Install

Run the installer.

```bash
pip install tool
```

```python
import tool
```

## Usage

Call the tool.

- one
- two
- three

## FAQ

<details><summary>Free?</summary>Yes.</details>
<details><summary>Offline?</summary>Also yes.</details>

![Diagram](img/a.png)
";

const INSTALL: usize = 1;
const USAGE: usize = 2;
const FAQ: usize = 3;

#[derive(Clone, Default)]
struct RecordingClipboard(Rc<RefCell<Vec<String>>>);

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Err(Error::Clipboard("no display".to_string()))
    }
}

fn app_with(width: u16, clipboard: Box<dyn Clipboard>) -> AppState {
    app_from(PAGE, width, clipboard)
}

fn app_from(page: &str, width: u16, clipboard: Box<dyn Clipboard>) -> AppState {
    let doc = MarkdownFormat.extract(page).unwrap();
    let cfg = Config::load_from(Path::new("/nonexistent/docview.toml"));
    let theme = ThemeSwitcher::load(Box::new(MemoryStore::default()));
    let mut app = AppState::new(doc, PathBuf::from("guide.md"), &cfg, theme, clipboard, width);
    app.settings.smooth_scroll = false;
    app.relayout(80, 10);
    app
}

fn app() -> AppState {
    app_with(120, Box::new(RecordingClipboard::default()))
}

fn key(app: &mut AppState, code: KeyCode, now: Instant) -> Flow {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
}

fn type_text(app: &mut AppState, text: &str, start: Instant, gap: Duration) -> Instant {
    let mut now = start;
    for c in text.chars() {
        key(app, KeyCode::Char(c), now);
        now += gap;
    }
    now - gap
}

fn click(app: &mut AppState, column: u16, row: u16, now: Instant) {
    app.handle_mouse(
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
        now,
    );
}

fn draw(app: &mut AppState, width: u16, height: u16) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
}

fn centre(r: Rect) -> (u16, u16) {
    (r.x + r.width / 2, r.y + r.height / 2)
}

fn visible(app: &AppState) -> Vec<bool> {
    app.document.sections.iter().map(|s| s.visible).collect()
}

#[test]
fn test_search_filters_after_typing_settles() {
    let start = Instant::now();
    let mut app = app();

    app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::ALT), start);
    assert_eq!(app.focus, Focus::Search);

    let last = type_text(&mut app, "install", start, Duration::from_millis(50));
    assert_eq!(app.search_input, "install");

    app.tick(last + Duration::from_millis(299));
    assert!(visible(&app).iter().all(|v| *v), "still inside the quiet window");

    app.tick(last + Duration::from_millis(300));
    assert_eq!(visible(&app), vec![false, true, false, false]);
    let install = &app.document.sections[INSTALL];
    assert!(install.elements[1].highlighted, "Run the installer.");
    assert!(install.elements[0].highlighted, "Install heading");
}

#[test]
fn test_list_item_match_keeps_only_its_section() {
    let start = Instant::now();
    let mut app = app_from(
        "# Setup\n\n## Getting started\n\n- Download the archive\n- Run the install script\n\n## Usage\n\nCall the tool.\n",
        120,
        Box::new(RecordingClipboard::default()),
    );
    app.focus = Focus::Search;
    let last = type_text(&mut app, "install", start, Duration::from_millis(40));
    app.tick(last + Duration::from_millis(300));

    let shown: Vec<&str> = app
        .document
        .sections
        .iter()
        .filter(|s| s.visible)
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(shown, vec!["getting-started"]);

    let highlighted: Vec<&str> = app
        .document
        .sections
        .iter()
        .flat_map(|s| &s.elements)
        .filter(|e| e.highlighted)
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(highlighted, vec!["Run the install script"]);
}

#[test]
fn test_clearing_the_box_restores_the_page() {
    let start = Instant::now();
    let mut app = app();
    app.search_now("install");

    app.focus = Focus::Search;
    app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), start);
    assert!(app.search_input.is_empty());
    app.tick(start + Duration::from_millis(300));

    assert!(visible(&app).iter().all(|v| *v));
    assert!(app.document.sections.iter().all(|s| !s.has_highlight()));
}

#[test]
fn test_no_results_notice() {
    let mut app = app();
    app.search_now("zzz");
    assert!(visible(&app).iter().all(|v| !*v));
    let notice = app.notice.clone().unwrap();
    assert!(notice.is_error);
    assert!(notice.text.contains("zzz"));

    app.search_now("usage");
    assert!(app.notice.is_none());
    assert!(app.document.sections[USAGE].visible);
}

#[test]
fn test_enter_applies_pending_search_at_once() {
    let start = Instant::now();
    let mut app = app();
    app.focus = Focus::Search;
    type_text(&mut app, "faq", start, Duration::from_millis(10));

    key(&mut app, KeyCode::Enter, start);
    assert_eq!(app.focus, Focus::Page);
    assert_eq!(visible(&app), vec![false, false, false, true]);
}

#[test]
fn test_search_focus_swallows_page_keys() {
    let now = Instant::now();
    let mut app = app();
    app.focus = Focus::Search;

    assert_eq!(key(&mut app, KeyCode::Char('q'), now), Flow::Continue);
    assert_eq!(app.search_input, "q");
    key(&mut app, KeyCode::Backspace, now);
    assert!(app.search_input.is_empty());

    key(&mut app, KeyCode::Esc, now);
    assert_eq!(key(&mut app, KeyCode::Char('q'), now), Flow::Quit);
}

#[test]
fn test_next_wakeup_tracks_debounce() {
    let now = Instant::now();
    let mut app = app();
    assert_eq!(app.next_wakeup(now), IDLE_WAIT);

    app.focus = Focus::Search;
    key(&mut app, KeyCode::Char('x'), now);
    assert_eq!(app.next_wakeup(now), Duration::from_millis(300));
    assert_eq!(
        app.next_wakeup(now + Duration::from_millis(100)),
        Duration::from_millis(200)
    );
}

#[test]
fn test_theme_shortcut_toggles_and_persists() {
    let now = Instant::now();
    let mut app = app();
    assert_eq!(app.theme.current(), Theme::Light);

    app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::ALT), now);
    assert_eq!(app.theme.current(), Theme::Dark);
    assert_eq!(app.focus, Focus::Page);
}

#[test]
fn test_copy_and_tab_switching() {
    let start = Instant::now();
    let clipboard = RecordingClipboard::default();
    let copied = clipboard.0.clone();
    let mut app = app_with(120, Box::new(clipboard));

    key(&mut app, KeyCode::Char('y'), start);
    key(&mut app, KeyCode::Char('2'), start);
    key(&mut app, KeyCode::Char('y'), start);
    assert_eq!(*copied.borrow(), ["pip install tool", "import tool"]);

    let Block::Tabs(group) = &app.document.sections[INSTALL].blocks[2] else {
        panic!("expected tabs");
    };
    assert_eq!(group.active(), 1);
    assert!(matches!(group.copy.state(), CopyState::Copied { .. }));
    assert_eq!(
        app.next_wakeup(start + Duration::from_millis(1500)),
        Duration::from_millis(500)
    );

    app.tick(start + Duration::from_secs(2));
    let Block::Tabs(group) = &app.document.sections[INSTALL].blocks[2] else {
        panic!("expected tabs");
    };
    assert_eq!(group.copy.state(), CopyState::Idle);
}

#[test]
fn test_copy_failure_is_reported_on_the_button() {
    let now = Instant::now();
    let mut app = app_with(120, Box::new(BrokenClipboard));

    key(&mut app, KeyCode::Char('y'), now);
    let Block::Tabs(group) = &app.document.sections[INSTALL].blocks[2] else {
        panic!("expected tabs");
    };
    assert_eq!(group.copy.label(), "✗ Copy failed");
}

#[test]
fn test_fold_active_section() {
    let now = Instant::now();
    let mut app = app();
    let active = app.document.active().unwrap();

    key(&mut app, KeyCode::Char('z'), now);
    assert!(!app.document.sections[active].open);
    app.relayout(80, 10);
    key(&mut app, KeyCode::Char('z'), now);
    assert!(app.document.sections[active].open);
}

#[test]
fn test_lazy_image_resolves_when_scrolled_into_view() {
    let now = Instant::now();
    let mut app = app();
    let loaded = |app: &AppState| match app.document.sections[FAQ].blocks.last() {
        Some(Block::Image(image)) => image.is_loaded(),
        _ => panic!("expected image"),
    };
    assert!(!loaded(&app));

    key(&mut app, KeyCode::End, now);
    app.relayout(80, 10);
    assert!(loaded(&app));
    assert!((app.viewport.progress() - 100.0).abs() < 1e-9);
    assert_eq!(app.document.active(), Some(FAQ));
}

#[test]
fn test_smooth_navigation_updates_active_section() {
    let start = Instant::now();
    let mut app = app();
    app.settings.smooth_scroll = true;

    app.navigate_to(USAGE);
    assert!(app.viewport.is_animating());

    let mut now = start;
    for _ in 0..100 {
        if !app.viewport.is_animating() {
            break;
        }
        assert_eq!(app.next_wakeup(now), FRAME);
        app.tick(now);
        now += FRAME;
    }
    assert!(!app.viewport.is_animating());
    assert_eq!(Some(app.viewport.offset()), app.page.section_top(USAGE));
    assert_eq!(app.document.active(), Some(USAGE));
}

#[test]
fn test_section_stepping() {
    let now = Instant::now();
    let mut app = app();
    let before = app.document.active().unwrap();

    key(&mut app, KeyCode::Char(']'), now);
    app.relayout(80, 10);
    assert_eq!(app.document.active(), Some(before + 1));

    key(&mut app, KeyCode::Char('['), now);
    app.relayout(80, 10);
    assert_eq!(app.document.active(), Some(before));
}

#[test]
fn test_hidden_section_link_is_ignored() {
    let mut app = app();
    app.search_now("faq");
    app.relayout(80, 10);

    app.navigate_to(USAGE);
    assert_eq!(app.viewport.offset(), 0);
}

#[test]
fn test_click_heading_folds_section() {
    let now = Instant::now();
    let mut app = app();
    app.layout.content = Rect::new(31, 4, 80, 10);

    let top = app.page.section_top(INSTALL).unwrap();
    let row = 4 + u16::try_from(top).unwrap();
    click(&mut app, 34, row, now);
    assert!(!app.document.sections[INSTALL].open);
}

#[test]
fn test_narrow_sidebar_closes_on_outside_click_and_link() {
    let now = Instant::now();
    let mut app = app_with(60, Box::new(RecordingClipboard::default()));
    assert!(app.is_narrow());
    assert!(!app.sidebar.is_open());

    key(&mut app, KeyCode::Char('m'), now);
    assert!(app.sidebar.is_open());
    draw(&mut app, 60, 30);
    click(&mut app, 50, 29, now);
    assert!(!app.sidebar.is_open());

    key(&mut app, KeyCode::Char('m'), now);
    draw(&mut app, 60, 30);
    let list = app.layout.sidebar_list;
    click(&mut app, list.x + 2, list.y + 3, now);
    assert!(!app.sidebar.is_open());
    let top = app.page.section_top(FAQ).unwrap();
    assert_eq!(app.viewport.offset(), top.min(app.viewport.max_offset()));
}

#[test]
fn test_wide_sidebar_stays_open() {
    let now = Instant::now();
    let mut app = app();
    assert!(app.sidebar.is_open());

    draw(&mut app, 120, 30);
    let list = app.layout.sidebar_list;
    click(&mut app, list.x + 2, list.y + 2, now);
    let top = app.page.section_top(USAGE).unwrap();
    assert_eq!(app.viewport.offset(), top.min(app.viewport.max_offset()));
    click(&mut app, 100, 20, now);
    assert!(app.sidebar.is_open());
}

#[test]
fn test_narrow_sidebar_closes_on_header_clicks() {
    let now = Instant::now();
    let mut app = app_with(60, Box::new(RecordingClipboard::default()));

    key(&mut app, KeyCode::Char('m'), now);
    draw(&mut app, 60, 30);
    let (x, y) = centre(app.layout.search);
    click(&mut app, x, y, now);
    assert_eq!(app.focus, Focus::Search);
    assert!(!app.sidebar.is_open());

    key(&mut app, KeyCode::Esc, now);
    key(&mut app, KeyCode::Char('m'), now);
    draw(&mut app, 60, 30);
    let (x, y) = centre(app.layout.theme);
    click(&mut app, x, y, now);
    assert_eq!(app.theme.current(), Theme::Dark);
    assert!(!app.sidebar.is_open());
}

#[test]
fn test_sidebar_border_click_is_inside() {
    let now = Instant::now();
    let mut app = app_with(60, Box::new(RecordingClipboard::default()));

    key(&mut app, KeyCode::Char('m'), now);
    draw(&mut app, 60, 30);
    let outer = app.layout.sidebar.unwrap();
    let list = app.layout.sidebar_list;
    assert!(outer.contains(Position::new(list.x + 2, list.y - 1)));
    assert!(!list.contains(Position::new(list.x + 2, list.y - 1)));

    click(&mut app, list.x + 2, list.y - 1, now);
    click(&mut app, outer.x, list.y + 1, now);
    assert!(app.sidebar.is_open());
    assert_eq!(app.viewport.offset(), 0);
    assert!(app.document.sections.iter().all(|s| s.open));
}

#[test]
fn test_header_buttons() {
    let now = Instant::now();
    let mut app = app();
    app.layout.menu = Rect::new(0, 1, 5, 3);
    app.layout.search = Rect::new(5, 1, 110, 3);
    app.layout.theme = Rect::new(115, 1, 5, 3);

    click(&mut app, 116, 2, now);
    assert_eq!(app.theme.current(), Theme::Dark);

    click(&mut app, 20, 2, now);
    assert_eq!(app.focus, Focus::Search);

    click(&mut app, 1, 2, now);
    assert_eq!(app.focus, Focus::Page);
    assert!(!app.sidebar.is_open());
}

#[test]
fn test_scroll_top_button() {
    let now = Instant::now();
    let mut app = app();
    key(&mut app, KeyCode::End, now);
    assert!(app.shows_scroll_top());

    app.layout.scroll_top = Some(Rect::new(100, 13, 3, 1));
    click(&mut app, 101, 13, now);
    assert_eq!(app.viewport.offset(), 0);
    assert!(!app.shows_scroll_top());
}

#[test]
fn test_print_shortcut_writes_file() {
    let now = Instant::now();
    let dir = TempDir::new().unwrap();
    let mut app = app();
    app.settings.print_dir = dir.path().to_path_buf();

    app.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL), now);
    assert!(dir.path().join("guide.txt").is_file());
    let notice = app.notice.clone().unwrap();
    assert!(!notice.is_error);

    app.tick(now + Duration::from_secs(2));
    assert!(app.notice.is_none());
}
