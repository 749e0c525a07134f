mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use view::AppView;
use controller::AppController;
use model::{ApiClient, AppModel, FileStore, PreferenceStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Arc::new(Config::parse());

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Dashboard-RS Starting ===");

    if config.openweather_key().is_none() {
        tracing::warn!("No OpenWeather API key configured, weather requests will fail");
    }

    let client = ApiClient::new(config.clone())?;
    let preferences = PreferenceStore::new(FileStore::open(&config.prefs_file));
    let app_model = AppModel::new(preferences);
    tracing::info!(
        active_view = ?app_model.active_view(),
        dark_mode = app_model.is_dark_mode(),
        "Preferences restored"
    );

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model, client, &config);
    controller.start().await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Dashboard-RS shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let snapshot = controller.snapshot().await;

        terminal.draw(|f| {
            AppView::render(f, &snapshot);
        })?;

        // Short poll so responses landing in the background show up promptly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if controller.should_quit().await {
            break;
        }
    }

    Ok(())
}
