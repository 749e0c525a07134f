//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{Focus, ViewKind};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            model.set_should_quit(true);
            return Ok(());
        }

        // Help popup swallows everything until closed
        if model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup();
            }
            return Ok(());
        }

        let view = model.active_view();

        if model.focus() == Focus::Search {
            match key.code {
                KeyCode::Enter => {
                    drop(model);
                    self.commit(view).await;
                }
                KeyCode::Esc | KeyCode::Tab => {
                    model.set_focus(Focus::Content);
                }
                KeyCode::Backspace => {
                    drop(model);
                    self.pop_char(view).await;
                }
                KeyCode::Up if view == ViewKind::Crypto => {
                    drop(model);
                    self.market.move_selection(-1).await;
                }
                KeyCode::Down if view == ViewKind::Crypto => {
                    drop(model);
                    self.market.move_selection(1).await;
                }
                KeyCode::Char(c) => {
                    drop(model);
                    self.push_char(view, c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true);
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.prev_view();
                } else {
                    model.next_view();
                }
            }
            KeyCode::BackTab => {
                model.prev_view();
            }
            KeyCode::Char('1') => model.set_active_view(ViewKind::Weather),
            KeyCode::Char('2') => model.set_active_view(ViewKind::Crypto),
            KeyCode::Char('3') => model.set_active_view(ViewKind::Github),
            // Theme toggle
            KeyCode::Char('t') | KeyCode::Char('T') => {
                model.toggle_dark_mode();
            }
            // Focus search
            KeyCode::Char('/') | KeyCode::Char('s') | KeyCode::Char('S') => {
                model.set_focus(Focus::Search);
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.refresh(view).await;
            }
            KeyCode::Enter => {
                drop(model);
                self.commit(view).await;
            }
            KeyCode::Up | KeyCode::Char('k') if view == ViewKind::Crypto => {
                drop(model);
                self.market.move_selection(-1).await;
            }
            KeyCode::Down | KeyCode::Char('j') if view == ViewKind::Crypto => {
                drop(model);
                self.market.move_selection(1).await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use clap::Parser;
    use tokio::sync::Mutex;

    use crate::config::Config;
    use crate::model::{ApiClient, AppModel, PreferenceStore, Theme};

    fn controller() -> AppController {
        // Providers point at a released local port: anything fetched fails fast
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
        drop(listener);
        let config = Config::parse_from([
            "dashboard-rs",
            "--github-url",
            base.as_str(),
            "--coingecko-url",
            base.as_str(),
            "--openweather-url",
            base.as_str(),
        ]);
        let client = ApiClient::new(Arc::new(config.clone())).unwrap();
        let model = Arc::new(Mutex::new(AppModel::new(PreferenceStore::in_memory())));
        AppController::new(model, client, &config)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_number_keys_switch_views() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('2'))).await.unwrap();
        assert_eq!(controller.snapshot().await.ui.active_view, ViewKind::Crypto);

        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        assert_eq!(controller.snapshot().await.ui.active_view, ViewKind::Github);

        controller.handle_key_event(press(KeyCode::BackTab)).await.unwrap();
        assert_eq!(controller.snapshot().await.ui.active_view, ViewKind::Crypto);
    }

    #[tokio::test]
    async fn test_theme_key_toggles() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('t'))).await.unwrap();
        assert_eq!(controller.snapshot().await.ui.theme, Theme::Light);
        controller.handle_key_event(press(KeyCode::Char('t'))).await.unwrap();
        assert_eq!(controller.snapshot().await.ui.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_typing_goes_to_active_input() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('3'))).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();

        // Typed characters, including view hotkeys, land in the input while searching
        for c in "x1t".chars() {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        controller.handle_key_event(press(KeyCode::Backspace)).await.unwrap();

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.github.input, "octocatx1");
        assert_eq!(snapshot.ui.active_view, ViewKind::Github);
        assert_eq!(snapshot.ui.theme, Theme::Dark);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert_eq!(controller.snapshot().await.ui.focus, Focus::Content);
    }

    #[tokio::test]
    async fn test_help_popup_blocks_other_keys() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('h'))).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!controller.should_quit().await);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(controller.should_quit().await);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_while_searching() {
        let controller = controller();
        controller.handle_key_event(press(KeyCode::Char('/'))).await.unwrap();
        controller
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(controller.should_quit().await);
    }
}
