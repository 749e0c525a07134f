//! Model module - Application state and data types
//!
//! - `types`: Core type definitions (view kinds, focus, theme, UI state)
//! - `preferences`: Typed preference store over a key-value backend
//! - `fetch_state`: Request lifecycle of a remote view
//! - `weather`, `market`, `github`: Provider payloads and their reshaping
//! - `api_client`: HTTP client and per-view fetchers
//! - `app_model`: Shell state with persistence

mod types;
mod preferences;
mod fetch_state;
mod weather;
mod market;
mod github;
mod api_client;
mod app_model;

pub use types::{Focus, Theme, UiState, ViewKind};

pub use preferences::{FileStore, PreferenceStore};

pub use fetch_state::{FetchState, FetchStatus, ViewSnapshot};

pub use weather::{Condition, ConditionKind, DailyForecast, WeatherReport, FORECAST_CHART_DAYS};

pub use market::{filter_assets, price_series, resolve_selection, step_selection, Asset};

pub use github::{GithubReport, REPO_LIST_LIMIT};

pub use api_client::{ApiClient, FetchError, Fetcher, GithubFetcher, MarketFetcher, WeatherFetcher};

pub use app_model::AppModel;
