//! View module - UI rendering
//!
//! - `palette`: Dark and light colour schemes
//! - `utils`: Formatting and shared placeholders (skeleton, idle, error)
//! - `layout`: Header, view selector, search bar, key hints
//! - `weather`, `market`, `github`: One renderer per dashboard
//! - `overlays`: Help popup

mod palette;
mod utils;
mod layout;
mod weather;
mod market;
mod github;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

use crate::controller::DashboardSnapshot;
use crate::model::{FetchStatus, ViewKind};
use palette::Palette;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, snapshot: &DashboardSnapshot) {
        let ui_state = &snapshot.ui;
        let palette = Palette::for_theme(ui_state.theme);

        // Paint the theme background first so every widget sits on it
        frame.render_widget(Block::default().style(palette.base()), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header + theme toggle
                Constraint::Length(3), // View selector
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Active dashboard
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], ui_state, &palette);
        layout::render_selector(frame, chunks[1], ui_state, &palette);

        let (input, status): (&str, &FetchStatus) = match ui_state.active_view {
            ViewKind::Weather => (&snapshot.weather.input, &snapshot.weather.state.status),
            ViewKind::Crypto => (&snapshot.market.view.input, &snapshot.market.view.state.status),
            ViewKind::Github => (&snapshot.github.input, &snapshot.github.state.status),
        };
        layout::render_search_bar(frame, chunks[2], ui_state, input, status, &palette);

        match ui_state.active_view {
            ViewKind::Weather => weather::render(frame, chunks[3], &snapshot.weather, &palette),
            ViewKind::Crypto => market::render(frame, chunks[3], &snapshot.market, &palette),
            ViewKind::Github => github::render(frame, chunks[3], &snapshot.github, &palette),
        }

        layout::render_key_hints(frame, chunks[4], ui_state, &palette);

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame, &palette);
        }
    }
}
