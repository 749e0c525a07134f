//! Core type definitions for the application

use serde::{Deserialize, Serialize};

/// Which dashboard is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Weather,
    Crypto,
    Github,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Weather, ViewKind::Crypto, ViewKind::Github];

    pub fn next(self) -> Self {
        match self {
            ViewKind::Weather => ViewKind::Crypto,
            ViewKind::Crypto => ViewKind::Github,
            ViewKind::Github => ViewKind::Weather,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ViewKind::Weather => ViewKind::Github,
            ViewKind::Crypto => ViewKind::Weather,
            ViewKind::Github => ViewKind::Crypto,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ViewKind::Weather => 0,
            ViewKind::Crypto => 1,
            ViewKind::Github => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Weather => "Weather",
            ViewKind::Crypto => "Crypto Market",
            ViewKind::Github => "GitHub Stats",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ViewKind::Weather => "Real-time weather data and forecasts",
            ViewKind::Crypto => "Cryptocurrency prices and market data",
            ViewKind::Github => "Repository statistics and analytics",
        }
    }

    pub fn search_placeholder(self) -> &'static str {
        match self {
            ViewKind::Weather => "Enter city...",
            ViewKind::Crypto => "Search cryptocurrencies...",
            ViewKind::Github => "Enter GitHub username...",
        }
    }
}

/// Which part of the screen receives keystrokes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    Search,
    #[default]
    Content,
}

/// Colour scheme selected by the dark mode preference
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_view: ViewKind,
    pub theme: Theme,
    pub focus: Focus,
    pub show_help_popup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_view() {
        let mut view = ViewKind::Weather;
        for expected in [ViewKind::Crypto, ViewKind::Github, ViewKind::Weather] {
            view = view.next();
            assert_eq!(view, expected);
        }
        assert_eq!(ViewKind::Weather.prev(), ViewKind::Github);
    }

    #[test]
    fn test_view_kind_tags() {
        assert_eq!(serde_json::to_string(&ViewKind::Github).unwrap(), "\"github\"");
        let parsed: ViewKind = serde_json::from_str("\"crypto\"").unwrap();
        assert_eq!(parsed, ViewKind::Crypto);
    }
}
