//! HTTP clients for the three upstream providers
//!
//! `ApiClient` owns the shared reqwest client and provider base URLs. Each
//! dashboard gets a small [`Fetcher`] that turns a committed query into its
//! report; the controller only sees the trait.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::github::{GithubReport, Profile, Repository, REPOS_PER_PAGE};
use super::market::Asset;
use super::weather::{CurrentResponse, ForecastResponse, WeatherReport};
use crate::config::Config;
use crate::{log_api_request, log_api_result};

const USER_AGENT: &str = concat!("dashboard-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },
    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("invalid base url {0}")]
    InvalidUrl(String),
}

/// Turns a committed query into a view payload
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    type Output: Clone + Send + 'static;

    async fn fetch(&self, query: &str) -> Result<Self::Output, FetchError>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<Config>,
}

impl ApiClient {
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, config })
    }

    /// GET `url` and decode the body, keeping transport, status and parse failures apart
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T, FetchError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url: url.to_string() });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_markets(&self, per_page: u32) -> Result<Vec<Asset>, FetchError> {
        log_api_request!("get_markets", per_page);
        let url = format!("{}/coins/markets", self.config.coingecko_url);
        let result = self
            .get_json(
                &url,
                &[
                    ("vs_currency", "usd".to_string()),
                    ("sparkline", "true".to_string()),
                    ("order", "market_cap_desc".to_string()),
                    ("per_page", per_page.to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await;
        log_api_result!("get_markets", result);
        result
    }

    /// `{github}/users/{handle}/...` with the handle kept as one escaped path segment
    fn github_user_url(&self, handle: &str, tail: &[&str]) -> Result<Url, FetchError> {
        let base = &self.config.github_url;
        let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .push("users")
            .push(handle)
            .extend(tail);
        Ok(url)
    }

    pub async fn get_profile(&self, handle: &str) -> Result<Profile, FetchError> {
        log_api_request!("get_profile", handle);
        let url = self.github_user_url(handle, &[])?;
        let result = self.get_json(url.as_str(), &[]).await;
        log_api_result!("get_profile", result);
        result
    }

    pub async fn get_repositories(&self, handle: &str) -> Result<Vec<Repository>, FetchError> {
        log_api_request!("get_repositories", handle);
        let url = self.github_user_url(handle, &["repos"])?;
        let result = self
            .get_json(url.as_str(), &[("per_page", REPOS_PER_PAGE.to_string())])
            .await;
        log_api_result!("get_repositories", result);
        result
    }

    fn weather_params(&self, city: &str) -> Result<Vec<(&'static str, String)>, FetchError> {
        let key = self
            .config
            .openweather_key()
            .ok_or(FetchError::MissingCredential("OPENWEATHER_API_KEY is not set"))?;
        Ok(vec![
            ("q", city.to_string()),
            ("APPID", key),
            ("units", "metric".to_string()),
        ])
    }

    pub async fn get_current_weather(&self, city: &str) -> Result<CurrentResponse, FetchError> {
        log_api_request!("get_current_weather", city);
        let url = format!("{}/data/2.5/weather", self.config.openweather_url);
        let params = self.weather_params(city)?;
        let result = self.get_json(&url, &params).await;
        log_api_result!("get_current_weather", result);
        result
    }

    pub async fn get_forecast(&self, city: &str) -> Result<ForecastResponse, FetchError> {
        log_api_request!("get_forecast", city);
        let url = format!("{}/data/2.5/forecast", self.config.openweather_url);
        let params = self.weather_params(city)?;
        let result = self.get_json(&url, &params).await;
        log_api_result!("get_forecast", result);
        result
    }
}

/// Current conditions plus the grouped forecast for a city
pub struct WeatherFetcher {
    client: ApiClient,
}

impl WeatherFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for WeatherFetcher {
    type Output = WeatherReport;

    async fn fetch(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let (current, forecast) = futures::try_join!(
            self.client.get_current_weather(city),
            self.client.get_forecast(city),
        )?;
        Ok(WeatherReport::from_responses(current, forecast))
    }
}

/// Top assets by market cap. The list is not narrowed by the query; that
/// happens client-side on the raw input.
pub struct MarketFetcher {
    client: ApiClient,
    per_page: u32,
}

impl MarketFetcher {
    pub fn new(client: ApiClient, per_page: u32) -> Self {
        Self { client, per_page }
    }
}

#[async_trait]
impl Fetcher for MarketFetcher {
    type Output = Vec<Asset>;

    async fn fetch(&self, _query: &str) -> Result<Vec<Asset>, FetchError> {
        self.client.get_markets(self.per_page).await
    }
}

/// Profile, then repository list, for an account handle
pub struct GithubFetcher {
    client: ApiClient,
}

impl GithubFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for GithubFetcher {
    type Output = GithubReport;

    async fn fetch(&self, handle: &str) -> Result<GithubReport, FetchError> {
        let profile = self.client.get_profile(handle).await?;
        let repositories = self.client.get_repositories(handle).await?;
        Ok(GithubReport::new(profile, repositories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn client_with(args: &[&str]) -> ApiClient {
        let mut argv = vec!["dashboard-rs"];
        argv.extend_from_slice(args);
        ApiClient::new(Arc::new(Config::parse_from(argv))).unwrap()
    }

    #[test]
    fn test_weather_params_include_key_and_units() {
        let client = client_with(&["--openweather-api-key", "k3y"]);
        let params = client.weather_params("Oslo").unwrap();
        assert!(params.contains(&("q", "Oslo".to_string())));
        assert!(params.contains(&("APPID", "k3y".to_string())));
        assert!(params.contains(&("units", "metric".to_string())));
    }

    /// A local address that was just released, so connections are refused
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn test_handle_stays_one_path_segment() {
        let client = client_with(&[]);
        let profile = client.github_user_url("a/b?x#y", &[]).unwrap();
        assert_eq!(profile.as_str(), "https://api.github.com/users/a%2Fb%3Fx%23y");

        let repos = client.github_user_url("octocat", &["repos"]).unwrap();
        assert_eq!(repos.as_str(), "https://api.github.com/users/octocat/repos");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let client = client_with(&["--github-url", "http://localhost:8080/api/v3/"]);
        let url = client.github_user_url("octocat", &["repos"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v3/users/octocat/repos");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = client_with(&["--github-url", "not a url"]);
        let err = client.github_user_url("octocat", &[]).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let base = closed_port_url();
        let client = client_with(&["--github-url", base.as_str()]);
        let err = client.get_profile("octocat").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://api.github.com/users/nobody".to_string(),
        };
        assert_eq!(err.to_string(), "https://api.github.com/users/nobody returned 404 Not Found");

        let parse = serde_json::from_str::<Profile>("[]").unwrap_err();
        assert!(FetchError::from(parse).to_string().starts_with("unexpected response shape"));
    }
}
