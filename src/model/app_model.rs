//! Shell state: active view, theme, focus and popups

use super::preferences::{PreferenceStore, ACTIVE_VIEW_KEY, DARK_MODE_KEY};
use super::types::{Focus, Theme, UiState, ViewKind};

/// Top-level application model. The preference store is handed in so the
/// shell never reaches for ambient storage.
pub struct AppModel {
    preferences: PreferenceStore,
    active_view: ViewKind,
    dark_mode: bool,
    focus: Focus,
    show_help_popup: bool,
    should_quit: bool,
}

impl AppModel {
    pub fn new(preferences: PreferenceStore) -> Self {
        let active_view = preferences.active_view();
        let dark_mode = preferences.dark_mode();
        tracing::debug!(?active_view, dark_mode, "Loaded preferences");
        Self {
            preferences,
            active_view,
            dark_mode,
            focus: Focus::default(),
            show_help_popup: false,
            should_quit: false,
        }
    }

    // ========================================================================
    // View selector
    // ========================================================================

    pub fn active_view(&self) -> ViewKind {
        self.active_view
    }

    pub fn set_active_view(&mut self, view: ViewKind) {
        if view == self.active_view {
            return;
        }
        tracing::info!(from = ?self.active_view, to = ?view, "Switching view");
        self.active_view = view;
        self.preferences.set(ACTIVE_VIEW_KEY, &view);
    }

    pub fn next_view(&mut self) {
        self.set_active_view(self.active_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_active_view(self.active_view.prev());
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        tracing::info!(dark_mode = self.dark_mode, "Theme toggled");
        self.preferences.set(DARK_MODE_KEY, &self.dark_mode);
    }

    // ========================================================================
    // Focus, popups, lifecycle
    // ========================================================================

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.show_help_popup
    }

    pub fn show_help_popup(&mut self) {
        self.show_help_popup = true;
    }

    pub fn hide_help_popup(&mut self) {
        self.show_help_popup = false;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            active_view: self.active_view,
            theme: self.theme(),
            focus: self.focus,
            show_help_popup: self.show_help_popup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::preferences::FileStore;

    #[test]
    fn test_starts_from_defaults() {
        let model = AppModel::new(PreferenceStore::in_memory());
        assert_eq!(model.active_view(), ViewKind::Weather);
        assert_eq!(model.theme(), Theme::Dark);
        assert_eq!(model.focus(), Focus::Content);
    }

    #[test]
    fn test_toggle_twice_restores_theme() {
        let mut model = AppModel::new(PreferenceStore::in_memory());
        let original = model.theme();

        model.toggle_dark_mode();
        assert_ne!(model.theme(), original);
        model.toggle_dark_mode();
        assert_eq!(model.theme(), original);
    }

    #[test]
    fn test_view_and_theme_persist_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut model = AppModel::new(PreferenceStore::new(FileStore::open(&path)));
        model.set_active_view(ViewKind::Crypto);
        model.next_view();
        model.toggle_dark_mode();
        drop(model);

        let restored = AppModel::new(PreferenceStore::new(FileStore::open(&path)));
        assert_eq!(restored.active_view(), ViewKind::Github);
        assert!(!restored.is_dark_mode());
    }

    #[test]
    fn test_prev_view_wraps() {
        let mut model = AppModel::new(PreferenceStore::in_memory());
        model.prev_view();
        assert_eq!(model.active_view(), ViewKind::Github);
        assert_eq!(model.ui_state().active_view, ViewKind::Github);
    }
}
