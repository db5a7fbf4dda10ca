//! High-level client — `CoinwatchClient`.
//!
//! Ties the store, the poll scheduler and one history view per pinned coin
//! together. This is what a presentation layer talks to: it reads the store's
//! selectors and the views' states, and calls `pin` / `unpin`.

use crate::domain::coin::Coin;
use crate::error::SyncError;
use crate::gateway::PriceGateway;
use crate::shared::{Symbol, TrackedUniverse};
use crate::sync::{HistoryView, PollScheduler, PollState, PollStatus, RetryPolicy, SyncStore};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// The primary entry point.
///
/// Lifecycle methods (`start`, `pin`, ...) must run inside a tokio runtime.
/// Dropping the client cancels the scheduler and every open view.
pub struct CoinwatchClient {
    store: SyncStore,
    scheduler: PollScheduler,
    /// Open history views: symbol → view.
    views: HashMap<Symbol, HistoryView>,
    retry: RetryPolicy,
}

impl CoinwatchClient {
    pub fn builder() -> CoinwatchClientBuilder {
        CoinwatchClientBuilder::default()
    }

    /// The shared store. Clones of it observe the same state.
    pub fn store(&self) -> &SyncStore {
        &self.store
    }

    // ── Polling ──────────────────────────────────────────────────────────

    /// Refresh now and then on every poll interval.
    ///
    /// Coins still pinned from before a `stop()` get their history views back.
    pub async fn start(&mut self) {
        self.scheduler.start();
        let pinned = self.store.selected().await;
        for symbol in pinned {
            self.ensure_view(symbol).await;
        }
    }

    /// Stop polling and close every history view. Pins are kept.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        for view in self.views.values_mut() {
            view.close();
        }
        self.views.clear();
    }

    pub fn poll_state(&self) -> PollState {
        self.scheduler.state()
    }

    pub fn poll_status(&self) -> PollStatus {
        self.scheduler.status()
    }

    /// One refresh outside the schedule; errors are returned, not swallowed.
    pub async fn refresh_now(&self) -> Result<usize, SyncError> {
        self.store.refresh_coins().await
    }

    // ── Pinning ──────────────────────────────────────────────────────────

    /// Select `symbol` and open its history view.
    ///
    /// Returns `false` if the coin is not listed or is already pinned. An
    /// already pinned coin without a view still gets one.
    pub async fn pin(&mut self, symbol: impl Into<Symbol>) -> bool {
        let symbol = symbol.into();
        let selected = self.store.select_coin(&symbol).await;
        if selected || self.store.is_selected(&symbol).await {
            self.ensure_view(symbol).await;
        }
        selected
    }

    async fn ensure_view(&mut self, symbol: Symbol) {
        if self.views.contains_key(&symbol) {
            return;
        }
        let view = HistoryView::open(self.store.clone(), symbol.clone(), self.retry).await;
        self.views.insert(symbol, view);
    }

    /// Deselect `symbol` and close its view. Returns `false` if it was not pinned.
    pub async fn unpin(&mut self, symbol: impl Into<Symbol>) -> bool {
        let symbol = symbol.into();
        if let Some(mut view) = self.views.remove(&symbol) {
            view.close();
        }
        self.store.remove_coin(&symbol).await
    }

    pub fn view(&self, symbol: &Symbol) -> Option<&HistoryView> {
        self.views.get(symbol)
    }

    /// Views in pin order.
    pub async fn pinned_views(&self) -> Vec<&HistoryView> {
        self.store
            .selected()
            .await
            .iter()
            .filter_map(|s| self.views.get(s))
            .collect()
    }

    // ── Selectors ────────────────────────────────────────────────────────

    pub async fn coins(&self) -> Vec<Coin> {
        self.store.coins().await
    }

    pub async fn search(&self, term: &str) -> Vec<Coin> {
        self.store.search(term).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinwatchClientBuilder {
    base_url: String,
    gateway: Option<Arc<dyn PriceGateway>>,
    tracked: TrackedUniverse,
    poll_interval: Duration,
    retry_policy: RetryPolicy,
    history_window_days: u32,
    request_timeout: Duration,
}

impl Default for CoinwatchClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            gateway: None,
            tracked: TrackedUniverse::default(),
            poll_interval: crate::network::DEFAULT_POLL_INTERVAL,
            retry_policy: RetryPolicy::default(),
            history_window_days: crate::network::DEFAULT_HISTORY_WINDOW_DAYS,
            request_timeout: crate::network::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl CoinwatchClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Use a custom gateway instead of the HTTP one. `base_url` and
    /// `request_timeout` are then ignored.
    pub fn gateway(mut self, gateway: Arc<dyn PriceGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn tracked(mut self, tracked: TrackedUniverse) -> Self {
        self.tracked = tracked;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn history_window_days(mut self, days: u32) -> Self {
        self.history_window_days = days;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CoinwatchClient, SyncError> {
        if self.poll_interval.is_zero() {
            return Err(SyncError::Validation("poll interval must be non-zero".into()));
        }
        if self.history_window_days == 0 {
            return Err(SyncError::Validation("history window must be at least one day".into()));
        }

        let gateway = match self.gateway {
            Some(gateway) => gateway,
            None => default_gateway(&self.base_url, self.request_timeout)?,
        };
        let store = SyncStore::new(gateway, self.tracked, self.history_window_days);

        Ok(CoinwatchClient {
            scheduler: PollScheduler::with_interval(store.clone(), self.poll_interval),
            store,
            views: HashMap::new(),
            retry: self.retry_policy,
        })
    }
}

#[cfg(feature = "http")]
fn default_gateway(base_url: &str, timeout: Duration) -> Result<Arc<dyn PriceGateway>, SyncError> {
    Ok(Arc::new(crate::http::CoinGeckoHttp::with_timeout(base_url, timeout)?))
}

#[cfg(not(feature = "http"))]
fn default_gateway(_base_url: &str, _timeout: Duration) -> Result<Arc<dyn PriceGateway>, SyncError> {
    Err(SyncError::Validation(
        "no gateway configured; enable the `http` feature or call `gateway(...)`".into(),
    ))
}
