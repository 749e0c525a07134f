//! Colours for the dark and light themes

use ratatui::style::{Color, Modifier, Style};

use crate::model::{Theme, ViewKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub up: Color,
    pub down: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                border: Color::Gray,
                up: Color::Green,
                down: Color::Red,
                warning: Color::Yellow,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                border: Color::DarkGray,
                up: Color::Green,
                down: Color::Red,
                warning: Color::Rgb(180, 120, 0),
            },
        }
    }

    /// Accent colour of each dashboard
    pub fn accent(&self, view: ViewKind) -> Color {
        match view {
            ViewKind::Weather => Color::Cyan,
            ViewKind::Crypto => Color::Green,
            ViewKind::Github => Color::Magenta,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool, view: ViewKind) -> Style {
        if focused {
            Style::default().fg(self.accent(view))
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title(&self, view: ViewKind) -> Style {
        Style::default()
            .fg(self.accent(view))
            .add_modifier(Modifier::BOLD)
    }

    pub fn trend(&self, is_up: bool) -> Style {
        Style::default().fg(if is_up { self.up } else { self.down })
    }
}
