//! Controller module - Application logic and event handling
//!
//! - `remote_view`: Debounced fetch lifecycle shared by every dashboard
//! - `market`: Market view selection on top of its remote view
//! - `input`: Key event handling

mod remote_view;
mod market;
mod input;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::model::{
    ApiClient, AppModel, GithubFetcher, GithubReport, MarketFetcher, UiState, ViewKind,
    ViewSnapshot, WeatherFetcher, WeatherReport,
};

pub use market::{MarketSnapshot, MarketView};
pub use remote_view::{RemoteView, RemoteViewConfig};

pub const WEATHER_SEED: &str = "san francisco";
pub const GITHUB_SEED: &str = "octocat";
pub const MARKET_SEED: &str = "";

/// Everything the view layer needs for one frame
#[derive(Clone, Debug)]
pub struct DashboardSnapshot {
    pub ui: UiState,
    pub weather: ViewSnapshot<WeatherReport>,
    pub market: MarketSnapshot,
    pub github: ViewSnapshot<GithubReport>,
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) weather: RemoteView<WeatherFetcher>,
    pub(crate) market: MarketView<MarketFetcher>,
    pub(crate) github: RemoteView<GithubFetcher>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, client: ApiClient, config: &Config) -> Self {
        let weather = RemoteView::new(
            WeatherFetcher::new(client.clone()),
            RemoteViewConfig {
                name: "weather",
                debounce: config.weather_debounce(),
                min_query_len: 3,
            },
            WEATHER_SEED,
        );
        let market = MarketView::new(RemoteView::new(
            MarketFetcher::new(client.clone(), config.market_limit),
            RemoteViewConfig {
                name: "market",
                debounce: config.market_debounce(),
                min_query_len: 0,
            },
            MARKET_SEED,
        ));
        let github = RemoteView::new(
            GithubFetcher::new(client),
            RemoteViewConfig {
                name: "github",
                debounce: config.github_debounce(),
                min_query_len: 1,
            },
            GITHUB_SEED,
        );

        Self { model, weather, market, github }
    }

    /// Kick off the initial fetch of every dashboard with its seed query
    pub async fn start(&self) {
        tracing::info!("Loading initial dashboard data");
        self.weather.commit_query().await;
        self.market.remote.commit_query().await;
        self.github.commit_query().await;
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let ui = self.model.lock().await.ui_state();
        DashboardSnapshot {
            ui,
            weather: self.weather.snapshot().await,
            market: self.market.snapshot().await,
            github: self.github.snapshot().await,
        }
    }

    pub async fn should_quit(&self) -> bool {
        self.model.lock().await.should_quit()
    }

    // ========================================================================
    // Dispatch to the remote view behind the active dashboard
    // ========================================================================

    pub(crate) async fn push_char(&self, view: ViewKind, c: char) {
        match view {
            ViewKind::Weather => self.weather.push_char(c).await,
            ViewKind::Crypto => self.market.remote.push_char(c).await,
            ViewKind::Github => self.github.push_char(c).await,
        }
    }

    pub(crate) async fn pop_char(&self, view: ViewKind) {
        match view {
            ViewKind::Weather => self.weather.pop_char().await,
            ViewKind::Crypto => self.market.remote.pop_char().await,
            ViewKind::Github => self.github.pop_char().await,
        }
    }

    pub(crate) async fn commit(&self, view: ViewKind) -> bool {
        match view {
            ViewKind::Weather => self.weather.commit_query().await,
            ViewKind::Crypto => self.market.remote.commit_query().await,
            ViewKind::Github => self.github.commit_query().await,
        }
    }

    pub(crate) async fn refresh(&self, view: ViewKind) -> bool {
        match view {
            ViewKind::Weather => self.weather.refresh().await,
            ViewKind::Crypto => self.market.remote.refresh().await,
            ViewKind::Github => self.github.refresh().await,
        }
    }
}
