//! Overlay rendering (help popup)

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::palette::Palette;

const KEYBINDINGS: &[(&str, &str)] = &[
    ("", "── Views ──"),
    ("1 / 2 / 3", "Weather / Crypto / GitHub"),
    ("Tab / Shift+Tab", "Next / previous view"),
    ("T", "Toggle dark mode"),
    ("", ""),
    ("", "── Search ──"),
    ("/ or S", "Focus search"),
    ("Enter", "Fetch now"),
    ("Esc", "Leave search"),
    ("R", "Refresh current query"),
    ("", ""),
    ("", "── Crypto ──"),
    ("↑ / ↓", "Select asset"),
    ("", ""),
    ("", "── General ──"),
    ("H", "Toggle this help"),
    ("Q / Ctrl+C", "Quit"),
];

pub fn render_help_popup(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    let popup_width = 56.min(area.width.saturating_sub(2));
    let popup_height = (KEYBINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = KEYBINDINGS
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^50}", desc),
                    Style::default().fg(palette.warning).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(palette.up).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(palette.fg)),
                ])
            }
        })
        .collect();

    let help = Paragraph::new(lines).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Help (H or Esc to close) ")
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(help, popup_area);
}
