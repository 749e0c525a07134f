//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// API key baked in at build time, used when none is given at runtime
const BUILD_TIME_OPENWEATHER_KEY: Option<&str> = option_env!("OPENWEATHER_API_KEY");

#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard-rs", version, about = "Terminal dashboard for weather, crypto markets and GitHub stats")]
pub struct Config {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_api_key: Option<String>,

    /// Where the active view and theme are persisted
    #[arg(long, env = "DASHBOARD_PREFS_FILE", default_value = ".cache/preferences.json")]
    pub prefs_file: PathBuf,

    /// Directory for rotating log files
    #[arg(long, env = "DASHBOARD_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Quiet period before the weather view fetches typed input
    #[arg(long, env = "DASHBOARD_WEATHER_DEBOUNCE_MS", default_value_t = 2000)]
    pub weather_debounce_ms: u64,

    /// Quiet period before the market view fetches typed input
    #[arg(long, env = "DASHBOARD_MARKET_DEBOUNCE_MS", default_value_t = 600)]
    pub market_debounce_ms: u64,

    /// Quiet period before the GitHub view fetches typed input
    #[arg(long, env = "DASHBOARD_GITHUB_DEBOUNCE_MS", default_value_t = 600)]
    pub github_debounce_ms: u64,

    /// Number of assets requested from the market provider
    #[arg(long, default_value_t = 10)]
    pub market_limit: u32,

    #[arg(long, env = "DASHBOARD_OPENWEATHER_URL", default_value = "https://api.openweathermap.org")]
    pub openweather_url: String,

    #[arg(long, env = "DASHBOARD_COINGECKO_URL", default_value = "https://api.coingecko.com/api/v3")]
    pub coingecko_url: String,

    #[arg(long, env = "DASHBOARD_GITHUB_URL", default_value = "https://api.github.com")]
    pub github_url: String,
}

impl Config {
    /// Runtime key first, then whatever was present when the binary was built
    pub fn openweather_key(&self) -> Option<String> {
        let usable = |key: &&str| !key.trim().is_empty();
        self.openweather_api_key
            .as_deref()
            .filter(usable)
            .or(BUILD_TIME_OPENWEATHER_KEY.filter(usable))
            .map(str::to_string)
    }

    pub fn weather_debounce(&self) -> Duration {
        Duration::from_millis(self.weather_debounce_ms)
    }

    pub fn market_debounce(&self) -> Duration {
        Duration::from_millis(self.market_debounce_ms)
    }

    pub fn github_debounce(&self) -> Duration {
        Duration::from_millis(self.github_debounce_ms)
    }
}
