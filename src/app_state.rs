//! The context object bridging the page model and the terminal.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls, searches and clicks. `AppState` owns the document together with every piece of
//! behaviour state (search engine, theme, sidebar, viewport, widget states) and turns terminal
//! events into calls on them. Nothing here reads the clock: every handler takes `now`, so a
//! sequence of events replays identically in tests.

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::document::Document;
use crate::keymap::Shortcut;
use crate::nav::{self, Sidebar};
use crate::page::{BlockRef, RenderedPage, Renderer, Target};
use crate::print;
use crate::search::{SearchEngine, SearchOutcome};
use crate::section::Block;
use crate::theme::ThemeSwitcher;
use crate::viewport::{Viewport, FRAME};
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Longest the event loop sleeps when nothing is scheduled.
pub const IDLE_WAIT: Duration = Duration::from_secs(1);

/// Lines moved per mouse wheel notch.
pub const WHEEL_LINES: isize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where typed characters go.
pub enum Focus {
    /// Keys drive scrolling and widgets.
    Page,
    /// Keys edit the search box.
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether the event loop keeps running.
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the viewer.
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A status-line message.
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Drawn in the warning colour.
    pub is_error: bool,
    /// When the message disappears; `None` keeps it until replaced.
    pub until: Option<Instant>,
}

#[derive(Clone, Debug)]
/// Behaviour settings taken from the configuration.
pub struct Settings {
    /// Maximum content width.
    pub wrap_width: usize,
    /// Copy confirmation window.
    pub copy_feedback: Duration,
    /// Lines before a section top at which it becomes active.
    pub nav_offset: usize,
    /// Offset past which the scroll-to-top button shows.
    pub scroll_top_after: usize,
    /// Widths at or below this use the narrow layout.
    pub narrow_width: u16,
    /// Animate jumps.
    pub smooth_scroll: bool,
    /// Print output directory.
    pub print_dir: PathBuf,
}

impl From<&Config> for Settings {
    fn from(cfg: &Config) -> Self {
        Self {
            wrap_width: cfg.wrap_width,
            copy_feedback: cfg.copy_feedback(),
            nav_offset: cfg.nav_offset,
            scroll_top_after: cfg.scroll_top_after,
            narrow_width: cfg.narrow_width,
            smooth_scroll: cfg.smooth_scroll,
            print_dir: PathBuf::from(&cfg.print_dir),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Screen areas of the last drawn frame, used to route mouse clicks.
pub struct ScreenLayout {
    /// Terminal width.
    pub width: u16,
    /// Menu (sidebar toggle) button.
    pub menu: Rect,
    /// Search box.
    pub search: Rect,
    /// Theme toggle button.
    pub theme: Rect,
    /// Sidebar including its border, when shown.
    pub sidebar: Option<Rect>,
    /// Rows of the sidebar list.
    pub sidebar_list: Rect,
    /// First section listed in the sidebar.
    pub sidebar_offset: usize,
    /// Page text area.
    pub content: Rect,
    /// Scroll-to-top button, when shown.
    pub scroll_top: Option<Rect>,
}

/// Owns the page and all behaviour state for one viewing session.
pub struct AppState {
    /// The page being viewed.
    pub document: Document,
    /// File the page was loaded from.
    pub source: PathBuf,
    /// Debounced search over `document`.
    pub search: SearchEngine,
    /// Raw contents of the search box.
    pub search_input: String,
    /// Keyboard focus.
    pub focus: Focus,
    /// Current theme and its persistence.
    pub theme: ThemeSwitcher,
    /// Section list state.
    pub sidebar: Sidebar,
    /// Scroll state of the content pane.
    pub viewport: Viewport,
    /// Layout from the last relayout.
    pub page: RenderedPage,
    /// Screen areas from the last frame.
    pub layout: ScreenLayout,
    /// Status-line message.
    pub notice: Option<Notice>,
    /// Behaviour settings.
    pub settings: Settings,
    renderer: Renderer,
    clipboard: Box<dyn Clipboard>,
    last_step: Option<Instant>,
}

impl AppState {
    #[must_use]
    /// Initialises a session; the sidebar starts closed if `width` is narrow.
    pub fn new(
        document: Document,
        source: PathBuf,
        cfg: &Config,
        theme: ThemeSwitcher,
        clipboard: Box<dyn Clipboard>,
        width: u16,
    ) -> Self {
        let settings = Settings::from(cfg);
        let narrow = width <= settings.narrow_width;

        Self {
            document,
            source,
            search: SearchEngine::new(cfg.debounce()),
            search_input: String::new(),
            focus: Focus::Page,
            theme,
            sidebar: Sidebar::new(narrow),
            viewport: Viewport::default(),
            page: RenderedPage::default(),
            layout: ScreenLayout {
                width,
                ..ScreenLayout::default()
            },
            notice: None,
            settings,
            renderer: Renderer::new(),
            clipboard,
            last_step: None,
        }
    }

    #[must_use]
    /// Whether the terminal is at or below the narrow breakpoint.
    pub fn is_narrow(&self) -> bool {
        self.layout.width <= self.settings.narrow_width
    }

    /// Lays the page out for a content pane of `width` x `height`.
    ///
    /// Images entering the pane are resolved here, and the active section follows the scroll
    /// position.
    pub fn relayout(&mut self, width: usize, height: usize) {
        let width = width.min(self.settings.wrap_width);
        self.page = self
            .renderer
            .render(&self.document, self.theme.current(), width);
        self.viewport.resize(self.page.height(), height);

        if self.resolve_visible_images() {
            self.page = self
                .renderer
                .render(&self.document, self.theme.current(), width);
            self.viewport.resize(self.page.height(), height);
        }

        self.update_active();
    }

    fn visible_lines(&self) -> std::ops::Range<usize> {
        let start = self.viewport.offset();
        start..start + self.viewport.height()
    }

    fn resolve_visible_images(&mut self) -> bool {
        let mut resolved = false;
        for at in self.page.images_in(self.visible_lines()) {
            if let Some(Block::Image(image)) = self.block_mut(at) {
                resolved |= image.resolve();
            }
        }
        resolved
    }

    fn update_active(&mut self) {
        let active = nav::active_section(
            &self.page.section_tops,
            self.viewport.offset(),
            self.settings.nav_offset,
        );
        self.document.set_active(active);
    }

    #[must_use]
    /// Whether the scroll-to-top button is shown.
    pub fn shows_scroll_top(&self) -> bool {
        self.viewport.shows_scroll_top(self.settings.scroll_top_after)
    }

    fn block(&self, at: BlockRef) -> Option<&Block> {
        self.document.sections.get(at.section)?.blocks.get(at.block)
    }

    fn block_mut(&mut self, at: BlockRef) -> Option<&mut Block> {
        self.document
            .sections
            .get_mut(at.section)?
            .blocks
            .get_mut(at.block)
    }

    fn set_notice(&mut self, text: impl Into<String>, is_error: bool, until: Option<Instant>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error,
            until,
        });
    }

    // --- Event handling ---

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        if let Some(shortcut) = Shortcut::from_key(&key) {
            self.apply_shortcut(shortcut, now);
            return Flow::Continue;
        }

        match self.focus {
            Focus::Search => {
                self.search_key(key, now);
                Flow::Continue
            }
            Focus::Page => self.page_key(key, now),
        }
    }

    /// Runs a global shortcut.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut, now: Instant) {
        tracing::debug!("shortcut {shortcut:?}");
        match shortcut {
            Shortcut::FocusSearch => self.focus = Focus::Search,
            Shortcut::ToggleTheme => {
                self.theme.toggle();
            }
            Shortcut::Print => self.print(now),
        }
    }

    fn search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Page,
            KeyCode::Enter => {
                self.focus = Focus::Page;
                if let Some(outcome) = self.search.flush(&mut self.document) {
                    self.on_search(&outcome);
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.search.input(&self.search_input, now);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
                self.search.input(&self.search_input, now);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search_input.push(c);
                self.search.input(&self.search_input, now);
            }
            _ => {}
        }
    }

    fn page_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        let page_lines = isize::try_from(self.viewport.height().saturating_sub(1).max(1))
            .unwrap_or(isize::MAX);

        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Esc => {
                if self.sidebar.is_open() && self.is_narrow() {
                    self.sidebar.toggle();
                }
            }
            KeyCode::Char('m') => {
                self.sidebar.toggle();
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page_lines),
            KeyCode::PageUp => self.scroll_by(-page_lines),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => {
                self.viewport
                    .scroll_to(self.viewport.max_offset(), self.settings.smooth_scroll);
            }
            KeyCode::Char(']') => self.step_section(true),
            KeyCode::Char('[') => self.step_section(false),
            KeyCode::Char('z') => {
                let section = self
                    .document
                    .active()
                    .or_else(|| self.document.visible_sections().first().copied());
                if let Some(section) = section {
                    self.activate(Target::Fold(section), now);
                }
            }
            KeyCode::Char('y') => {
                if let Some(at) = self.page.focused_widget(self.visible_lines()) {
                    self.activate(Target::Copy(at), now);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.widget_item(digit as usize - 1, now);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Handles mouse wheel and left clicks.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_LINES),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_LINES),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row, now),
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) {
        let pos = Position::new(column, row);
        let layout = self.layout;

        if layout.sidebar.is_some_and(|r| r.contains(pos)) {
            self.focus = Focus::Page;
            let list = layout.sidebar_list;
            if list.contains(pos) {
                let index = layout.sidebar_offset + usize::from(row - list.y);
                if index < self.document.sections.len() {
                    self.navigate_to(index);
                }
            }
            return;
        }
        if layout.menu.contains(pos) {
            self.focus = Focus::Page;
            self.sidebar.toggle();
            return;
        }

        self.sidebar.click_outside(self.is_narrow());

        if layout.search.contains(pos) {
            self.focus = Focus::Search;
            return;
        }
        self.focus = Focus::Page;

        if layout.theme.contains(pos) {
            self.theme.toggle();
            return;
        }
        if layout.scroll_top.is_some_and(|r| r.contains(pos)) {
            self.scroll_to_top();
            return;
        }

        if layout.content.contains(pos) {
            let line = self.viewport.offset() + usize::from(row - layout.content.y);
            let column = usize::from(column - layout.content.x);
            if let Some(target) = self.page.hotspot_at(line, column) {
                self.activate(target, now);
            }
        }
    }

    // --- Behaviours ---

    fn scroll_by(&mut self, delta: isize) {
        self.viewport.scroll_by(delta);
        self.update_active();
    }

    /// Scroll-to-top button.
    pub fn scroll_to_top(&mut self) {
        self.viewport.scroll_to(0, self.settings.smooth_scroll);
    }

    /// Follows a navigation link to `section`.
    ///
    /// Sections hidden by the current search have no position to scroll to and are ignored.
    pub fn navigate_to(&mut self, section: usize) {
        let Some(top) = self.page.section_top(section) else {
            tracing::debug!("section {section} is hidden");
            return;
        };
        tracing::debug!("navigate to #{}", self.document.sections[section].id);
        self.viewport.scroll_to(top, self.settings.smooth_scroll);
        self.sidebar.link_followed(self.is_narrow());
    }

    fn step_section(&mut self, forward: bool) {
        let tops = &self.page.section_tops;
        let current = self.document.active();
        let position = current.and_then(|a| tops.iter().position(|(s, _)| *s == a));

        let next = match (position, forward) {
            (None, true) => tops.first(),
            (None, false) => None,
            (Some(p), true) => tops.get(p + 1),
            (Some(p), false) => p.checked_sub(1).and_then(|p| tops.get(p)),
        };

        if let Some(&(section, _)) = next {
            self.navigate_to(section);
        }
    }

    fn widget_item(&mut self, k: usize, now: Instant) {
        let Some(at) = self.page.focused_widget(self.visible_lines()) else {
            return;
        };
        let target = match self.block(at) {
            Some(Block::Tabs(_)) => Target::Tab(at, k),
            Some(Block::Accordion(_)) => Target::Accordion(at, k),
            _ => return,
        };
        self.activate(target, now);
    }

    /// Performs the action of a clickable control.
    pub fn activate(&mut self, target: Target, now: Instant) {
        match target {
            Target::Fold(section) => {
                if let Some(section) = self.document.sections.get_mut(section) {
                    section.toggle_open();
                }
            }
            Target::Copy(at) => self.copy(at, now),
            Target::Tab(at, k) => {
                if let Some(Block::Tabs(group)) = self.block_mut(at) {
                    group.activate(k);
                }
            }
            Target::Accordion(at, k) => {
                if let Some(Block::Accordion(group)) = self.block_mut(at) {
                    group.toggle(k);
                }
            }
        }
    }

    /// Copies a code block (or the active tab of a tab group) to the clipboard.
    pub fn copy(&mut self, at: BlockRef, now: Instant) {
        let code = match self.block(at) {
            Some(Block::Code(code)) => code.code.clone(),
            Some(Block::Tabs(group)) => match group.active_tab() {
                Some(tab) => tab.code.clone(),
                None => return,
            },
            _ => return,
        };

        let copied = match self.clipboard.set_text(&code) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("copy failed: {e}");
                false
            }
        };

        let window = self.settings.copy_feedback;
        match self.block_mut(at) {
            Some(Block::Code(code)) => code.copy.finish(copied, now, window),
            Some(Block::Tabs(group)) => group.copy.finish(copied, now, window),
            _ => {}
        }
    }

    /// Writes the visible page to the print directory.
    pub fn print(&mut self, now: Instant) {
        let result = print::print_to(
            &self.document,
            &self.source,
            &self.settings.print_dir,
            self.settings.wrap_width,
        );
        let until = Some(now + self.settings.copy_feedback);
        match result {
            Ok(path) => self.set_notice(format!("Printed to {}", path.display()), false, until),
            Err(e) => {
                tracing::warn!("print failed: {e}");
                self.set_notice(format!("Print failed: {e}"), true, until);
            }
        }
    }

    /// Fills the search box with `raw` and evaluates it immediately.
    pub fn search_now(&mut self, raw: &str) {
        self.search_input = raw.to_string();
        let outcome = self.search.run(&mut self.document, raw);
        self.on_search(&outcome);
    }

    fn on_search(&mut self, outcome: &SearchOutcome) {
        if outcome.is_no_results() {
            self.set_notice(
                format!("No sections match \"{}\"", outcome.query.as_str()),
                true,
                None,
            );
        } else if self.notice.as_ref().is_some_and(|n| n.until.is_none()) {
            self.notice = None;
        }
    }

    // --- Timers ---

    /// Fires everything that has come due: the debounced search, the smooth-scroll frame,
    /// copy label reverts and notice expiry.
    pub fn tick(&mut self, now: Instant) {
        if let Some(outcome) = self.search.tick(&mut self.document, now) {
            self.on_search(&outcome);
        }

        if self.viewport.is_animating()
            && self
                .last_step
                .is_none_or(|t| now.duration_since(t) >= FRAME)
        {
            self.viewport.step();
            self.last_step = Some(now);
            self.update_active();
        }

        for section in &mut self.document.sections {
            for block in &mut section.blocks {
                match block {
                    Block::Code(code) => {
                        code.copy.tick(now);
                    }
                    Block::Tabs(group) => {
                        group.copy.tick(now);
                    }
                    _ => {}
                }
            }
        }

        if self
            .notice
            .as_ref()
            .and_then(|n| n.until)
            .is_some_and(|until| now >= until)
        {
            self.notice = None;
        }
    }

    #[must_use]
    /// How long the event loop may wait before something needs `tick`.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let mut wait = if self.viewport.is_animating() {
            FRAME
        } else {
            IDLE_WAIT
        };

        let copy_deadlines = self.document.sections.iter().flat_map(|s| {
            s.blocks.iter().filter_map(|b| match b {
                Block::Code(code) => code.copy.deadline(),
                Block::Tabs(group) => group.copy.deadline(),
                _ => None,
            })
        });

        let deadlines = copy_deadlines
            .chain(self.search.deadline())
            .chain(self.notice.as_ref().and_then(|n| n.until));

        for deadline in deadlines {
            wait = wait.min(deadline.saturating_duration_since(now));
        }
        wait
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
