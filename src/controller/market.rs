//! Market dashboard: remote view plus the selected asset

use std::sync::Arc;

use tokio::sync::Mutex;

use super::remote_view::RemoteView;
use crate::model::{filter_assets, resolve_selection, step_selection, Asset, Fetcher, ViewSnapshot};

/// Snapshot handed to the market renderer
#[derive(Clone, Debug, Default)]
pub struct MarketSnapshot {
    pub view: ViewSnapshot<Vec<Asset>>,
    pub selected: Option<String>,
}

/// The market view is the only one with a secondary selection. Changing it
/// never touches the network.
pub struct MarketView<F: Fetcher<Output = Vec<Asset>>> {
    pub remote: RemoteView<F>,
    selected: Arc<Mutex<Option<String>>>,
}

impl<F: Fetcher<Output = Vec<Asset>>> Clone for MarketView<F> {
    fn clone(&self) -> Self {
        Self {
            remote: self.remote.clone(),
            selected: self.selected.clone(),
        }
    }
}

impl<F: Fetcher<Output = Vec<Asset>>> MarketView<F> {
    pub fn new(remote: RemoteView<F>) -> Self {
        Self {
            remote,
            selected: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn select_item(&self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(asset = %id, "Selecting asset");
        *self.selected.lock().await = Some(id);
    }

    /// Move the selection through the assets visible under the current raw input
    pub async fn move_selection(&self, step: isize) {
        let snapshot = self.snapshot().await;
        let Some(assets) = snapshot.view.state.data.as_ref() else {
            return;
        };
        let visible = filter_assets(assets, &snapshot.view.input);
        let current = resolve_selection(assets, snapshot.selected.as_deref()).map(|asset| asset.id.as_str());
        if let Some(id) = step_selection(&visible, current, step) {
            self.select_item(id).await;
        }
    }

    pub async fn selected(&self) -> Option<String> {
        self.selected.lock().await.clone()
    }

    pub async fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            view: self.remote.snapshot().await,
            selected: self.selected().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::remote_view::RemoteViewConfig;
    use crate::model::{FetchError, FetchStatus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct StubMarkets {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Fetcher for StubMarkets {
        type Output = Vec<Asset>;

        async fn fetch(&self, _query: &str) -> Result<Vec<Asset>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let assets = serde_json::from_str(
                r#"[
                    {"id": "bitcoin", "name": "Bitcoin", "symbol": "btc"},
                    {"id": "ethereum", "name": "Ethereum", "symbol": "eth"},
                    {"id": "tether", "name": "Tether", "symbol": "usdt"}
                ]"#,
            )?;
            Ok(assets)
        }
    }

    async fn loaded_view() -> (MarketView<StubMarkets>, Arc<AtomicUsize>) {
        let stub = StubMarkets::default();
        let calls = stub.calls.clone();
        let remote = RemoteView::new(
            stub,
            RemoteViewConfig {
                name: "market",
                debounce: Duration::from_millis(600),
                min_query_len: 0,
            },
            "",
        );
        let market = MarketView::new(remote);
        market.remote.commit_query().await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(market.remote.snapshot().await.state.status, FetchStatus::Ready);
        (market, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_does_not_fetch() {
        let (market, calls) = loaded_view().await;
        market.select_item("ethereum").await;
        market.move_selection(1).await;

        assert_eq!(market.selected().await.as_deref(), Some("tether"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_selection_follows_raw_filter() {
        let (market, _calls) = loaded_view().await;
        market.remote.set_query_input("eth").await;

        // Visible: ethereum, tether. The implicit bitcoin selection is hidden.
        market.move_selection(1).await;
        assert_eq!(market.selected().await.as_deref(), Some("ethereum"));
        market.move_selection(1).await;
        assert_eq!(market.selected().await.as_deref(), Some("tether"));
        market.move_selection(-1).await;
        assert_eq!(market.selected().await.as_deref(), Some("ethereum"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_selection_moves_to_first_visible() {
        let (market, _calls) = loaded_view().await;
        market.select_item("bitcoin").await;
        market.remote.set_query_input("eth").await;

        market.move_selection(1).await;
        assert_eq!(market.selected().await.as_deref(), Some("ethereum"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_without_data_is_noop() {
        let remote = RemoteView::new(
            StubMarkets::default(),
            RemoteViewConfig {
                name: "market",
                debounce: Duration::from_millis(600),
                min_query_len: 0,
            },
            "",
        );
        let market = MarketView::new(remote);
        market.move_selection(1).await;
        assert_eq!(market.selected().await, None);
    }
}
