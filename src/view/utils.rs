//! Shared rendering helpers: formatting, placeholders and status panels

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::palette::Palette;
use crate::model::ViewKind;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// `1234567.891` -> `1,234,567.89`
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Price with more precision for sub-dollar assets
pub fn format_price(value: f64) -> String {
    let decimals = if value.abs() < 1.0 { 4 } else { 2 };
    format!("${}", format_thousands(value, decimals))
}

/// `3.1e10` -> `$31.00B`
pub fn format_billions(value: f64) -> String {
    format!("${:.2}B", value / 1e9)
}

pub fn format_percent(value: f64) -> String {
    format!("{}{:.2}%", if value >= 0.0 { "+" } else { "" }, value)
}

pub fn format_temp(value: f64) -> String {
    format!("{}°C", value.round() as i64)
}

/// Split `area` into `count` equal columns
pub fn columns(area: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

pub fn card_block<'a>(title: impl Into<Line<'a>>, palette: &Palette, view: ViewKind) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false, view))
        .title(title)
        .title_style(palette.title(view))
        .padding(Padding::horizontal(1))
}

/// Big value with a caption underneath, as used by metric cards
pub fn render_metric(frame: &mut Frame, area: Rect, value: String, caption: &str, palette: &Palette) {
    let text = vec![
        Line::from(Span::styled(value, Style::default().fg(palette.fg).add_modifier(Modifier::BOLD))).centered(),
        Line::from(Span::styled(caption.to_string(), palette.muted())).centered(),
    ];
    frame.render_widget(Paragraph::new(text), area);
}

/// Placeholder shown while a request is in flight
pub fn render_skeleton(frame: &mut Frame, area: Rect, cards: usize, palette: &Palette, view: ViewKind) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    for card in columns(rows[0], cards) {
        let width = card.width.saturating_sub(4) as usize;
        let text = vec![Line::from("░".repeat(width)), Line::from("░".repeat(width / 2))];
        frame.render_widget(
            Paragraph::new(text)
                .style(palette.muted())
                .block(card_block(" Loading... ", palette, view)),
            card,
        );
    }

    let chart_rows: Vec<Line> = (0..rows[1].height.saturating_sub(2))
        .map(|_| Line::from("▒".repeat(rows[1].width.saturating_sub(4) as usize)))
        .collect();
    frame.render_widget(
        Paragraph::new(chart_rows)
            .style(palette.muted())
            .block(card_block(" Loading... ", palette, view)),
        rows[1],
    );
}

/// Nothing requested yet
pub fn render_idle(frame: &mut Frame, area: Rect, hint: &str, palette: &Palette, view: ViewKind) {
    let text = Paragraph::new(format!("{hint}\n\nPress / to edit the search, Enter to fetch"))
        .style(palette.muted())
        .wrap(Wrap { trim: false })
        .block(card_block(" Nothing loaded ", palette, view));
    frame.render_widget(text, area);
}

/// The last request failed; show why
pub fn render_error(frame: &mut Frame, area: Rect, query: &str, diagnostic: &str, palette: &Palette) {
    let text = vec![
        Line::from(Span::styled(
            format!("Could not load \"{query}\""),
            Style::default().fg(palette.down).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(diagnostic.to_string(), Style::default().fg(palette.down))),
        Line::from(""),
        Line::from(Span::styled("Press r to retry or edit the search with /", palette.muted())),
    ];
    let panel = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.down))
            .title(" Error ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(999.0, 0), "999");
        assert_eq!(format_thousands(-1000.5, 1), "-1,000.5");
    }

    #[test]
    fn test_format_price_precision() {
        assert_eq!(format_price(67000.5), "$67,000.50");
        assert_eq!(format_price(0.123456), "$0.1235");
    }

    #[test]
    fn test_small_formatters() {
        assert_eq!(format_billions(3.1e10), "$31.00B");
        assert_eq!(format_percent(2.5), "+2.50%");
        assert_eq!(format_percent(-0.1), "-0.10%");
        assert_eq!(format_temp(16.6), "17°C");
        assert_eq!(truncate_string("Hello-World", 8), "Hello...");
        assert_eq!(truncate_string("short", 8), "short");
    }
}
