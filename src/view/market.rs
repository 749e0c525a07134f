//! Crypto market dashboard rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState},
    Frame,
};

use super::palette::Palette;
use super::utils::{
    card_block, format_billions, format_percent, format_price, render_error, render_idle, render_skeleton,
    truncate_string,
};
use crate::controller::MarketSnapshot;
use crate::model::{filter_assets, price_series, resolve_selection, Asset, FetchStatus, ViewKind};

const VIEW: ViewKind = ViewKind::Crypto;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &MarketSnapshot, palette: &Palette) {
    let state = &snapshot.view.state;
    match (&state.status, state.data.as_ref()) {
        (FetchStatus::Ready, Some(assets)) => {
            render_assets(frame, area, assets, &snapshot.view.input, snapshot.selected.as_deref(), palette)
        }
        (FetchStatus::Idle, _) | (FetchStatus::Ready, None) => {
            render_idle(frame, area, "Press Enter to load the market", palette, VIEW)
        }
        (FetchStatus::Loading, _) => render_skeleton(frame, area, 3, palette, VIEW),
        (FetchStatus::Error(diagnostic), _) => {
            render_error(frame, area, "market data", diagnostic, palette)
        }
    }
}

fn price_label(asset: &Asset) -> String {
    asset.current_price.map(format_price).unwrap_or_else(|| "-".to_string())
}

fn render_assets(
    frame: &mut Frame,
    area: Rect,
    assets: &[Asset],
    input: &str,
    selected_id: Option<&str>,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Asset table
            Constraint::Percentage(55), // Selected asset chart
        ])
        .split(area);

    // The table follows the raw input; the chart follows the selection
    let visible = filter_assets(assets, input);
    let selected = resolve_selection(assets, selected_id);

    render_table(frame, chunks[0], &visible, selected, palette);
    match selected {
        Some(asset) => render_detail(frame, chunks[1], asset, palette),
        None => frame.render_widget(
            Paragraph::new("No asset selected").style(palette.muted()).block(card_block(" Chart ", palette, VIEW)),
            chunks[1],
        ),
    }
}

fn render_table(frame: &mut Frame, area: Rect, visible: &[&Asset], selected: Option<&Asset>, palette: &Palette) {
    let block = card_block(format!(" Assets ({}) ", visible.len()), palette, VIEW);

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new("No assets match the search").style(palette.muted()).block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = visible
        .iter()
        .map(|asset| {
            Row::new(vec![
                Cell::from(format!(
                    "{} {}",
                    truncate_string(&asset.name, 14),
                    asset.symbol.to_uppercase()
                )),
                Cell::from(price_label(asset)),
                Cell::from(Span::styled(format_percent(asset.change_24h()), palette.trend(asset.is_up()))),
                Cell::from(asset.total_volume.map(format_billions).unwrap_or_else(|| "-".to_string())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["Name", "Price", "24h", "Volume"]).style(palette.muted()))
    .block(block)
    .row_highlight_style(Style::default().fg(palette.accent(VIEW)).add_modifier(Modifier::BOLD))
    .highlight_symbol("▶ ");

    let selected_index = selected.and_then(|s| visible.iter().position(|a| a.id == s.id));
    let mut table_state = TableState::default().with_selected(selected_index);
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_detail(frame: &mut Frame, area: Rect, asset: &Asset, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    let trend = palette.trend(asset.is_up());
    let header = vec![
        Line::from(vec![
            Span::styled(asset.name.clone(), Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", asset.symbol.to_uppercase()), palette.muted()),
        ]),
        Line::from(vec![
            Span::styled(price_label(asset), Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format_percent(asset.change_24h()), trend),
        ]),
    ];
    frame.render_widget(Paragraph::new(header).block(card_block(" Selected ", palette, VIEW)), rows[0]);

    let series = price_series(asset);
    let block = card_block(" 7-Day Price ", palette, VIEW);
    if series.is_empty() {
        frame.render_widget(Paragraph::new("No price history").style(palette.muted()).block(block), rows[1]);
        return;
    }

    let points: Vec<(f64, f64)> = series.iter().enumerate().map(|(i, p)| (i as f64, p.value)).collect();
    let low = series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let high = series.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((high - low) * 0.05).max(f64::EPSILON);

    let first_label = series.first().map(|p| p.label.clone()).unwrap_or_default();
    let last_label = series.last().map(|p| p.label.clone()).unwrap_or_default();

    let chart = Chart::new(vec![
        Dataset::default()
            .name("Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(trend)
            .data(&points),
    ])
    .block(block)
    .x_axis(
        Axis::default()
            .style(palette.muted())
            .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
            .labels([first_label, last_label]),
    )
    .y_axis(
        Axis::default()
            .style(palette.muted())
            .bounds([low - pad, high + pad])
            .labels([format_price(low), format_price(high)]),
    );

    frame.render_widget(chart, rows[1]);
}
