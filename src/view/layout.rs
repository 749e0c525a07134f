//! Shell layout: header with theme toggle, view selector, search bar, key hints

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Tabs},
    Frame,
};

use super::palette::Palette;
use crate::model::{FetchStatus, Focus, Theme, UiState, ViewKind};

pub fn render_header(frame: &mut Frame, area: Rect, ui_state: &UiState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title
            Constraint::Length(14), // Theme toggle
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("Analytics Dashboard", Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        Span::styled("  weather · markets · github", palette.muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let theme_label = match ui_state.theme {
        Theme::Dark => "☾ Dark",
        Theme::Light => "☀ Light",
    };
    let toggle = Paragraph::new(theme_label)
        .style(Style::default().fg(palette.warning))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(" t "),
        );
    frame.render_widget(toggle, chunks[1]);
}

pub fn render_selector(frame: &mut Frame, area: Rect, ui_state: &UiState, palette: &Palette) {
    let active = ui_state.active_view;
    let titles: Vec<Line> = ViewKind::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {} {} ", i + 1, view.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(palette.muted())
        .highlight_style(palette.title(active).add_modifier(Modifier::REVERSED))
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(Span::styled(format!(" {} ", active.description()), palette.muted())),
        );
    frame.render_widget(tabs, area);
}

pub fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    input: &str,
    status: &FetchStatus,
    palette: &Palette,
) {
    let view = ui_state.active_view;
    let focused = ui_state.focus == Focus::Search;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Input
            Constraint::Length(14), // Request status
        ])
        .split(area);

    let (text, style) = if input.is_empty() && !focused {
        (view.search_placeholder().to_string(), palette.muted())
    } else {
        (input.to_string(), Style::default().fg(palette.fg))
    };

    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if focused { " Search (Enter to fetch, Esc to leave) " } else { " Search (/) " })
            .padding(Padding::horizontal(1))
            .border_style(palette.border(focused, view)),
    );
    frame.render_widget(search, chunks[0]);

    if focused {
        // Border + padding on the left
        let x = chunks[0].x + 2 + input.chars().count() as u16;
        let max_x = chunks[0].right().saturating_sub(2);
        frame.set_cursor_position(Position::new(x.min(max_x), chunks[0].y + 1));
    }

    let (label, color) = match status {
        FetchStatus::Idle => ("Idle", palette.muted),
        FetchStatus::Loading => ("Loading…", palette.warning),
        FetchStatus::Ready => ("Up to date", palette.up),
        FetchStatus::Error(_) => ("Failed", palette.down),
    };
    let indicator = Paragraph::new(label)
        .style(Style::default().fg(color))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(indicator, chunks[1]);
}

pub fn render_key_hints(frame: &mut Frame, area: Rect, ui_state: &UiState, palette: &Palette) {
    let hints = match ui_state.focus {
        Focus::Search => " Type to search · Enter fetch · Esc leave search · Ctrl+C quit",
        Focus::Content if ui_state.active_view == ViewKind::Crypto => {
            " 1-3/Tab switch view · / search · ↑↓ select asset · r refresh · t theme · h help · q quit"
        }
        Focus::Content => " 1-3/Tab switch view · / search · r refresh · t theme · h help · q quit",
    };
    frame.render_widget(Paragraph::new(hints).style(palette.muted()), area);
}
