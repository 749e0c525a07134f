//! Weather dashboard rendering

use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::palette::Palette;
use super::utils::{card_block, columns, format_temp, render_error, render_idle, render_metric, render_skeleton};
use crate::model::{
    Condition, ConditionKind, DailyForecast, FetchStatus, ViewKind, ViewSnapshot, WeatherReport,
    FORECAST_CHART_DAYS,
};

const VIEW: ViewKind = ViewKind::Weather;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot<WeatherReport>, palette: &Palette) {
    let state = &snapshot.state;
    match (&state.status, state.data.as_ref()) {
        (FetchStatus::Ready, Some(report)) => render_report(frame, area, report, palette),
        (FetchStatus::Idle, _) | (FetchStatus::Ready, None) => {
            render_idle(frame, area, "Enter a city with at least 3 characters", palette, VIEW)
        }
        (FetchStatus::Loading, _) => render_skeleton(frame, area, 4, palette, VIEW),
        (FetchStatus::Error(diagnostic), _) => render_error(frame, area, &state.query, diagnostic, palette),
    }
}

fn glyph(condition: Option<&Condition>) -> (&'static str, Color) {
    match condition.map(Condition::kind) {
        Some(ConditionKind::Clear) => ("☀", Color::Yellow),
        Some(ConditionKind::Clouds) => ("☁", Color::Gray),
        Some(ConditionKind::Rain) => ("☂", Color::Blue),
        Some(ConditionKind::Snow) => ("❄", Color::LightCyan),
        Some(ConditionKind::Other) | None => ("⛅", Color::LightRed),
    }
}

fn weekday(day: &DailyForecast) -> String {
    day.date.weekday().to_string()
}

fn render_report(frame: &mut Frame, area: Rect, report: &WeatherReport, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Current conditions
            Constraint::Min(8),    // Forecast chart
            Constraint::Length(6), // Daily cards
        ])
        .split(area);

    render_current(frame, rows[0], report, palette);
    render_chart(frame, rows[1], &report.forecast, palette);
    render_daily_cards(frame, rows[2], &report.forecast, palette);
}

fn render_current(frame: &mut Frame, area: Rect, report: &WeatherReport, palette: &Palette) {
    let current = &report.current;
    let (icon, color) = glyph(current.condition.as_ref());
    let description = current
        .condition
        .as_ref()
        .map(|c| c.description.clone())
        .unwrap_or_default();

    let title = Line::from(vec![
        Span::raw(format!(" {}, {} ", report.location.name, report.location.country)),
        Span::styled(format!("{icon} "), Style::default().fg(color)),
    ]);
    let block = card_block(title, palette, VIEW);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    frame.render_widget(Paragraph::new(Span::styled(description, palette.muted())), lines[0]);

    let cells = columns(lines[1], 4);
    render_metric(frame, cells[0], format_temp(current.temp), "Temperature", palette);
    render_metric(frame, cells[1], format_temp(current.feels_like), "Feels like", palette);
    render_metric(frame, cells[2], format!("{}%", current.humidity), "Humidity", palette);
    render_metric(frame, cells[3], format!("{} m/s", current.wind_speed), "Wind Speed", palette);
}

fn render_chart(frame: &mut Frame, area: Rect, forecast: &[DailyForecast], palette: &Palette) {
    let days: Vec<&DailyForecast> = forecast.iter().take(FORECAST_CHART_DAYS).collect();
    let block = card_block(format!(" {}-Day Forecast ", days.len()), palette, VIEW);

    if days.is_empty() {
        frame.render_widget(Paragraph::new("No forecast available").style(palette.muted()).block(block), area);
        return;
    }

    let max_points: Vec<(f64, f64)> = days.iter().enumerate().map(|(i, d)| (i as f64, d.max)).collect();
    let min_points: Vec<(f64, f64)> = days.iter().enumerate().map(|(i, d)| (i as f64, d.min)).collect();

    let lowest = days.iter().map(|d| d.min).fold(f64::INFINITY, f64::min).floor() - 1.0;
    let highest = days.iter().map(|d| d.max).fold(f64::NEG_INFINITY, f64::max).ceil() + 1.0;

    let datasets = vec![
        Dataset::default()
            .name("max")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&max_points),
        Dataset::default()
            .name("min")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&min_points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(palette.muted())
                .bounds([0.0, (days.len().saturating_sub(1)).max(1) as f64])
                .labels(days.iter().map(|d| weekday(d)).collect::<Vec<_>>()),
        )
        .y_axis(
            Axis::default()
                .style(palette.muted())
                .bounds([lowest, highest])
                .labels([format_temp(lowest), format_temp(highest)]),
        );

    frame.render_widget(chart, area);
}

fn render_daily_cards(frame: &mut Frame, area: Rect, forecast: &[DailyForecast], palette: &Palette) {
    if forecast.is_empty() {
        return;
    }
    for (day, cell) in forecast.iter().zip(columns(area, forecast.len())) {
        let (icon, color) = glyph(day.condition.as_ref());
        let text = vec![
            Line::from(Span::styled(icon, Style::default().fg(color))).centered(),
            Line::from(Span::styled(
                format!("{}°", day.max.round() as i64),
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                format!("{}° / {}°", day.min.round() as i64, day.max.round() as i64),
                palette.muted(),
            ))
            .centered(),
        ];
        frame.render_widget(
            Paragraph::new(text).block(card_block(format!(" {} ", weekday(day)), palette, VIEW)),
            cell,
        );
    }
}
