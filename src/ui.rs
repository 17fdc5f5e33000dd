//! The UI renders the application state into something visible and clickable.
//!
//! One frame is, top to bottom: the reading-progress bar, a header with the menu button, search
//! box and theme toggle, the body (sidebar beside or over the page), and a status line. The draw
//! pass records the screen areas it used so mouse clicks can be routed afterwards.

use crate::app_state::{AppState, Focus, ScreenLayout};
use crate::keymap::Shortcut;
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Paragraph},
    Frame,
};

/// Columns taken by the sidebar.
pub const SIDEBAR_WIDTH: u16 = 30;

const BUTTON_WIDTH: u16 = 5;

const PAGE_HELP: &str =
    "j/k scroll · [ ] sections · m menu · / search · z fold · y copy · 1-9 tab/item · q quit";

const SEARCH_HELP: &str = "type to filter · Enter apply · Esc back · Ctrl+U clear";

fn width_of(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Draws one frame and records its layout on `app`.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let palette = app.theme.current().palette();
    let base = Style::default().fg(palette.foreground).bg(palette.background);
    f.render_widget(Block::default().style(base), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status
        ])
        .split(area);

    let mut layout = ScreenLayout {
        width: area.width,
        ..ScreenLayout::default()
    };
    app.layout.width = area.width;
    let narrow = app.is_narrow();

    draw_header(f, app, rows[1], palette, &mut layout);

    // Body: the sidebar shares the row on wide terminals and overlays the page on narrow ones.
    let body = rows[2];
    let sidebar_shown = app.sidebar.is_open() && body.width > SIDEBAR_WIDTH;
    let content_area = if sidebar_shown && !narrow {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body);
        cols[1]
    } else {
        body
    };

    let content = Rect {
        x: content_area.x + 1,
        width: content_area.width.saturating_sub(2),
        ..content_area
    };
    layout.content = content;
    app.relayout(usize::from(content.width), usize::from(content.height));

    draw_content(f, app, content);

    if app.shows_scroll_top() && content.width > 4 && content.height > 0 {
        let button = Rect {
            x: content.right().saturating_sub(4),
            y: content.bottom() - 1,
            width: 3,
            height: 1,
        };
        f.render_widget(
            Paragraph::new("[↑]").style(
                Style::default()
                    .fg(palette.background)
                    .bg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            button,
        );
        layout.scroll_top = Some(button);
    }

    if sidebar_shown {
        let rect = Rect {
            width: SIDEBAR_WIDTH,
            ..body
        };
        let (list_area, offset) = draw_sidebar(f, app, rect, palette);
        layout.sidebar = Some(rect);
        layout.sidebar_list = list_area;
        layout.sidebar_offset = offset;
    }

    let progress = (app.viewport.progress() / 100.0).clamp(0.0, 1.0);
    f.render_widget(
        LineGauge::default()
            .filled_style(Style::default().fg(palette.primary))
            .unfilled_style(Style::default().fg(palette.background))
            .line_set(symbols::line::THICK)
            .label("")
            .ratio(progress),
        rows[0],
    );

    draw_status(f, app, rows[3], palette);

    app.layout = layout;
}

fn draw_header(
    f: &mut Frame,
    app: &AppState,
    area: Rect,
    palette: Palette,
    layout: &mut ScreenLayout,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .split(area);

    let border = Style::default().fg(palette.muted);
    let button = |label: &'static str| {
        Paragraph::new(Line::from(label).centered())
            .style(Style::default().fg(palette.primary))
            .block(Block::default().borders(Borders::ALL).border_style(border))
    };

    f.render_widget(button("☰"), cols[0]);
    f.render_widget(button(app.theme.current().icon()), cols[2]);
    layout.menu = cols[0];
    layout.theme = cols[2];
    layout.search = cols[1];

    let focused = app.focus == Focus::Search;
    let search_border = if focused {
        Style::default().fg(palette.primary)
    } else {
        border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(search_border)
        .title(app.document.title.as_deref().unwrap_or("docview"));
    let inner = block.inner(cols[1]);

    let text = if app.search_input.is_empty() && !focused {
        Span::styled(
            format!("Search ({})", Shortcut::FocusSearch.keys()),
            Style::default().fg(palette.muted),
        )
    } else {
        Span::styled(app.search_input.clone(), Style::default().fg(palette.foreground))
    };
    f.render_widget(Paragraph::new(Line::from(text)).block(block), cols[1]);

    if focused {
        let x = inner
            .x
            .saturating_add(width_of(&app.search_input))
            .min(inner.right().saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

fn draw_content(f: &mut Frame, app: &AppState, area: Rect) {
    let start = app.viewport.offset().min(app.page.lines.len());
    let end = (start + usize::from(area.height)).min(app.page.lines.len());
    let lines = app.page.lines[start..end].to_vec();
    f.render_widget(Paragraph::new(lines), area);
}

/// Returns the list area and the index of the first section listed.
fn draw_sidebar(f: &mut Frame, app: &AppState, area: Rect, palette: Palette) -> (Rect, usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title("Contents")
        .style(Style::default().bg(palette.background));
    let inner = block.inner(area);

    let height = usize::from(inner.height).max(1);
    let active = app.document.active();
    let offset = active.map_or(0, |a| (a + 1).saturating_sub(height));

    let items: Vec<ListItem> = app
        .document
        .sections
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, section)| {
            let style = if Some(i) == active {
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if section.visible {
                Style::default().fg(palette.foreground)
            } else {
                Style::default().fg(palette.muted)
            };
            ListItem::new(Line::from(section.title.clone())).style(style)
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(List::new(items).block(block), area);
    (inner, offset)
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect, palette: Palette) {
    let line = if let Some(notice) = &app.notice {
        let colour = if notice.is_error {
            palette.danger
        } else {
            palette.success
        };
        Line::from(Span::styled(notice.text.clone(), Style::default().fg(colour)))
    } else {
        let help = match app.focus {
            Focus::Page => PAGE_HELP,
            Focus::Search => SEARCH_HELP,
        };
        Line::from(Span::styled(help, Style::default().fg(palette.muted)))
    };
    f.render_widget(Paragraph::new(line), area);
}
