//! Synchronization store: owns `SyncState` and the fetch-if-absent policy.

use super::state::SyncState;
use crate::domain::coin::Coin;
use crate::domain::price_history::PriceHistorySeries;
use crate::error::SyncError;
use crate::gateway::PriceGateway;
use crate::shared::universe::upstream_id;
use crate::shared::{Symbol, TrackedUniverse};

use async_lock::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to the dashboard state.
///
/// Cloning is cheap; every clone sees the same state. All writes replace whole
/// values under the write lock, so readers never see a half-applied refresh.
#[derive(Clone)]
pub struct SyncStore {
    gateway: Arc<dyn PriceGateway>,
    universe: TrackedUniverse,
    window_days: u32,
    state: Arc<RwLock<SyncState>>,
    /// Per-symbol fetch locks: symbol → lock held while its history is fetched.
    history_locks: Arc<Mutex<HashMap<Symbol, Arc<Mutex<()>>>>>,
}

impl SyncStore {
    pub fn new(gateway: Arc<dyn PriceGateway>, universe: TrackedUniverse, window_days: u32) -> Self {
        Self {
            gateway,
            universe,
            window_days,
            state: Arc::new(RwLock::new(SyncState::new())),
            history_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn universe(&self) -> &TrackedUniverse {
        &self.universe
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Fetch current prices for the tracked universe and replace `coins`.
    ///
    /// On failure `coins` is left exactly as it was. Returns the new coin count.
    pub async fn refresh_coins(&self) -> Result<usize, SyncError> {
        let coins = self
            .gateway
            .fetch_bulk_prices(self.universe.symbols())
            .await?;
        let count = coins.len();
        self.state.write().await.replace_coins(coins);
        tracing::debug!(count, "Coin list refreshed");
        Ok(count)
    }

    /// Pin a listed coin. Returns `false` when nothing changed (already
    /// pinned, or not in `coins`).
    pub async fn select_coin(&self, symbol: &Symbol) -> bool {
        let changed = self.state.write().await.select(symbol);
        if !changed {
            tracing::debug!("select_coin({}) ignored", symbol);
        }
        changed
    }

    /// Unpin a coin. Returns `false` when it was not pinned.
    pub async fn remove_coin(&self, symbol: &Symbol) -> bool {
        self.state.write().await.remove(symbol)
    }

    /// Cached history for `symbol`, fetching it first if absent.
    ///
    /// A symbol is fetched at most once per store: concurrent callers for the
    /// same symbol wait for the first fetch and then read its result. Symbols
    /// with no upstream id fail with [`SyncError::UnknownSymbol`] without
    /// touching the gateway.
    pub async fn ensure_history(&self, symbol: &Symbol) -> Result<PriceHistorySeries, SyncError> {
        if let Some(series) = self.cached_history(symbol).await {
            tracing::debug!("History cache hit for {}", symbol);
            return Ok(series);
        }
        if upstream_id(symbol).is_none() {
            return Err(SyncError::UnknownSymbol {
                symbol: symbol.to_string(),
            });
        }

        let lock = {
            let mut locks = self.history_locks.lock().await;
            locks
                .entry(symbol.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = lock.lock().await;

        // Another caller may have filled the cache while we waited.
        if let Some(series) = self.cached_history(symbol).await {
            return Ok(series);
        }

        let points = self
            .gateway
            .fetch_history(symbol, self.window_days)
            .await?;
        let series = PriceHistorySeries::new(symbol.clone(), points);
        tracing::debug!(points = series.len(), "History fetched for {}", symbol);

        let cached = self.state.write().await.insert_history(series).clone();
        // Later callers hit the cache, so the lock is no longer needed.
        self.history_locks.lock().await.remove(symbol);
        Ok(cached)
    }

    #[cfg(test)]
    async fn history_lock_count(&self) -> usize {
        self.history_locks.lock().await.len()
    }

    // ── Selectors ────────────────────────────────────────────────────────

    pub async fn cached_history(&self, symbol: &Symbol) -> Option<PriceHistorySeries> {
        self.state.read().await.history(symbol).cloned()
    }

    pub async fn coins(&self) -> Vec<Coin> {
        self.state.read().await.coins().to_vec()
    }

    pub async fn selected(&self) -> Vec<Symbol> {
        self.state.read().await.selected().to_vec()
    }

    pub async fn selected_coins(&self) -> Vec<Coin> {
        self.state.read().await.selected_coins()
    }

    pub async fn is_selected(&self, symbol: &Symbol) -> bool {
        self.state.read().await.is_selected(symbol)
    }

    pub async fn search(&self, term: &str) -> Vec<Coin> {
        self.state.read().await.search(term)
    }

    /// A consistent copy of the whole state.
    pub async fn snapshot(&self) -> SyncState {
        self.state.read().await.clone()
    }
}
