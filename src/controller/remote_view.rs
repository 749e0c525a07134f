//! Debounced fetch-and-render controller shared by all three dashboards
//!
//! A `RemoteView` buffers raw query input, turns it into a committed query
//! either on an explicit commit or after a quiet period, and tracks the
//! resulting request in a [`FetchState`].
//!
//! - Every input change reschedules a single debounce timer (last wins).
//! - A commit is skipped when the trimmed, lowercased query equals the last
//!   committed one.
//! - Each fetch carries a sequence number; only the newest one may write the
//!   state, so a slow stale response never overwrites a fresh one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::model::{FetchError, FetchState, Fetcher, ViewSnapshot};

/// Per-instance tuning
#[derive(Clone, Debug)]
pub struct RemoteViewConfig {
    /// Name used in logs
    pub name: &'static str,
    /// Quiet period after the last keystroke before auto-committing
    pub debounce: Duration,
    /// Trimmed queries shorter than this are never committed
    pub min_query_len: usize,
}

struct Inner<T> {
    input: String,
    committed: Option<String>,
    state: FetchState<T>,
    /// Bumped on every input change; a timer only fires for its own edition
    input_edition: u64,
    debounce: Option<JoinHandle<()>>,
    /// Sequence number of the newest issued request
    latest_request: u64,
}

pub struct RemoteView<F: Fetcher> {
    fetcher: Arc<F>,
    config: Arc<RemoteViewConfig>,
    inner: Arc<Mutex<Inner<F::Output>>>,
}

impl<F: Fetcher> Clone for RemoteView<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            config: self.config.clone(),
            inner: self.inner.clone(),
        }
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

impl<F: Fetcher> RemoteView<F> {
    pub fn new(fetcher: F, config: RemoteViewConfig, initial_input: &str) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(Inner {
                input: initial_input.to_string(),
                committed: None,
                state: FetchState::default(),
                input_edition: 0,
                debounce: None,
                latest_request: 0,
            })),
        }
    }

    /// Record raw input and restart the debounce timer. Never fetches directly.
    pub async fn set_query_input(&self, text: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.input = text.into();
        inner.input_edition += 1;
        if let Some(timer) = inner.debounce.take() {
            timer.abort();
        }

        let edition = inner.input_edition;
        let view = self.clone();
        let debounce = self.config.debounce;
        inner.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            view.debounce_elapsed(edition).await;
        }));
    }

    pub async fn push_char(&self, c: char) {
        let mut input = self.input().await;
        input.push(c);
        self.set_query_input(input).await;
    }

    pub async fn pop_char(&self) {
        let mut input = self.input().await;
        if input.pop().is_some() {
            self.set_query_input(input).await;
        }
    }

    /// Cancel any pending timer and fetch now if the input changed.
    /// Returns whether a request was issued.
    pub async fn commit_query(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if let Some(timer) = inner.debounce.take() {
            timer.abort();
        }
        self.commit_locked(&mut inner)
    }

    /// Fetch the committed query again even though it did not change
    pub async fn refresh(&self) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.committed.clone() {
            Some(query) => {
                tracing::debug!(view = self.config.name, query = %query, "Refreshing");
                self.issue_fetch(&mut inner, query);
                true
            }
            None => self.commit_locked(&mut inner),
        }
    }

    pub async fn input(&self) -> String {
        self.inner.lock().await.input.clone()
    }

    pub async fn committed_query(&self) -> Option<String> {
        self.inner.lock().await.committed.clone()
    }

    pub async fn snapshot(&self) -> ViewSnapshot<F::Output> {
        let inner = self.inner.lock().await;
        ViewSnapshot {
            input: inner.input.clone(),
            state: inner.state.clone(),
        }
    }

    async fn debounce_elapsed(&self, edition: u64) {
        let mut inner = self.inner.lock().await;
        if inner.input_edition != edition {
            return;
        }
        // This task is the timer; drop the handle instead of aborting ourselves
        inner.debounce = None;
        tracing::trace!(view = self.config.name, "Debounce elapsed");
        self.commit_locked(&mut inner);
    }

    fn commit_locked(&self, inner: &mut Inner<F::Output>) -> bool {
        let query = inner.input.trim().to_string();
        if query.chars().count() < self.config.min_query_len {
            tracing::debug!(view = self.config.name, query = %query, "Query too short, not committing");
            return false;
        }
        if inner.committed.as_deref().map(normalize) == Some(normalize(&query)) {
            tracing::trace!(view = self.config.name, query = %query, "Query unchanged, not committing");
            return false;
        }
        inner.committed = Some(query.clone());
        self.issue_fetch(inner, query);
        true
    }

    fn issue_fetch(&self, inner: &mut Inner<F::Output>, query: String) {
        inner.latest_request += 1;
        let request = inner.latest_request;
        inner.state.begin(&query);
        tracing::info!(view = self.config.name, request, query = %query, "Fetching");

        let view = self.clone();
        tokio::spawn(async move {
            let result = view.fetcher.fetch(&query).await;
            view.complete(request, result).await;
        });
    }

    async fn complete(&self, request: u64, result: Result<F::Output, FetchError>) {
        let mut inner = self.inner.lock().await;
        if request != inner.latest_request {
            tracing::debug!(
                view = self.config.name,
                request,
                latest = inner.latest_request,
                "Discarding stale response"
            );
            return;
        }
        match result {
            Ok(data) => inner.state.succeed(data),
            Err(e) => {
                tracing::error!(view = self.config.name, request, error = %e, "Fetch failed");
                inner.state.fail(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchStatus;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// Echoes the query back, after an optional per-query delay
    #[derive(Default)]
    struct EchoFetcher {
        calls: Arc<StdMutex<Vec<String>>>,
        slow_query: Option<(&'static str, Duration)>,
        fail_query: Option<&'static str>,
    }

    #[async_trait]
    impl Fetcher for EchoFetcher {
        type Output = String;

        async fn fetch(&self, query: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(query.to_string());
            if let Some((slow, delay)) = self.slow_query {
                if slow == query {
                    tokio::time::sleep(delay).await;
                }
            }
            if self.fail_query == Some(query) {
                return Err(FetchError::MissingCredential("test"));
            }
            Ok(query.to_uppercase())
        }
    }

    fn view(fetcher: EchoFetcher, debounce_ms: u64, min_query_len: usize) -> RemoteView<EchoFetcher> {
        RemoteView::new(
            fetcher,
            RemoteViewConfig {
                name: "test",
                debounce: Duration::from_millis(debounce_ms),
                min_query_len,
            },
            "",
        )
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_commits_once_with_last_value() {
        let fetcher = EchoFetcher::default();
        let calls = fetcher.calls.clone();
        let view = view(fetcher, 600, 0);

        for text in ["b", "bi", "bit", "bitc"] {
            view.set_query_input(text).await;
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;
        settle().await;

        assert_eq!(*calls.lock().unwrap(), vec!["bitc".to_string()]);
        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.state.status, FetchStatus::Ready);
        assert_eq!(snapshot.state.data.as_deref(), Some("BITC"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_twice_fetches_once() {
        let fetcher = EchoFetcher::default();
        let calls = fetcher.calls.clone();
        let view = view(fetcher, 600, 0);

        view.set_query_input("Octocat").await;
        assert!(view.commit_query().await);
        view.set_query_input("  octocat ").await;
        assert!(!view.commit_query().await);

        tokio::time::sleep(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(*calls.lock().unwrap(), vec!["Octocat".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_preempts_timer() {
        let fetcher = EchoFetcher::default();
        let calls = fetcher.calls.clone();
        let view = view(fetcher, 2000, 0);

        view.set_query_input("oslo").await;
        assert!(view.commit_query().await);
        settle().await;
        assert_eq!(calls.lock().unwrap().len(), 1);

        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_queries_are_ignored() {
        let fetcher = EchoFetcher::default();
        let calls = fetcher.calls.clone();
        let view = view(fetcher, 100, 3);

        view.set_query_input("ny").await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;
        assert!(!view.commit_query().await);
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(view.snapshot().await.state.status, FetchStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let fetcher = EchoFetcher {
            slow_query: Some(("first", Duration::from_millis(500))),
            ..Default::default()
        };
        let view = view(fetcher, 600, 0);

        view.set_query_input("first").await;
        view.commit_query().await;
        settle().await;
        view.set_query_input("second").await;
        view.commit_query().await;

        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.state.data.as_deref(), Some("SECOND"));
        assert_eq!(snapshot.state.query, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_sets_error_status() {
        let fetcher = EchoFetcher {
            fail_query: Some("nobody"),
            ..Default::default()
        };
        let view = view(fetcher, 600, 1);

        view.set_query_input("somebody").await;
        view.commit_query().await;
        settle().await;
        view.set_query_input("nobody").await;
        view.commit_query().await;
        settle().await;

        let snapshot = view.snapshot().await;
        assert!(matches!(snapshot.state.status, FetchStatus::Error(ref msg) if msg.contains("test")));
        assert_eq!(snapshot.state.data.as_deref(), Some("SOMEBODY"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_refetches_committed_query() {
        let fetcher = EchoFetcher::default();
        let calls = fetcher.calls.clone();
        let view = view(fetcher, 600, 0);

        view.set_query_input("london").await;
        view.commit_query().await;
        assert!(view.refresh().await);
        settle().await;

        assert_eq!(*calls.lock().unwrap(), vec!["london".to_string(), "london".to_string()]);
        assert_eq!(view.committed_query().await.as_deref(), Some("london"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_editing_helpers_restart_timer() {
        let fetcher = EchoFetcher::default();
        let calls = fetcher.calls.clone();
        let view = view(fetcher, 600, 0);

        view.push_char('e').await;
        view.push_char('t').await;
        view.push_char('x').await;
        view.pop_char().await;
        view.push_char('h').await;
        assert_eq!(view.input().await, "eth");

        tokio::time::sleep(Duration::from_millis(700)).await;
        settle().await;
        assert_eq!(*calls.lock().unwrap(), vec!["eth".to_string()]);
    }
}
