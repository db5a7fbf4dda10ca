//! History view controller — one per pinned coin.
//!
//! State machine: `Loading → Ready | Failed`, `Failed → Loading` after the
//! retry delay. A view opened for a symbol whose history is already cached
//! starts (and stays) `Ready` without touching the network.

use super::retry::RetryPolicy;
use super::store::SyncStore;
use crate::domain::price_history::PriceHistorySeries;
use crate::error::SyncError;
use crate::shared::Symbol;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Message shown when the upstream answers 429 or 403.
pub const RATE_LIMITED_MESSAGE: &str =
    "Too many requests or access forbidden. Data will be available soon.";

/// Message shown for every other failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Error fetching price history. Please try again later.";

/// Why a history fetch failed, as far as the user is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    Network,
}

impl FailureKind {
    pub fn of(err: &SyncError) -> Self {
        if err.is_rate_limited() {
            FailureKind::RateLimited
        } else {
            FailureKind::Network
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => RATE_LIMITED_MESSAGE,
            FailureKind::Network => NETWORK_ERROR_MESSAGE,
        }
    }
}

/// What the chart for one symbol should render.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryViewState {
    /// Fetch `attempt` (1-indexed) is in flight.
    Loading { attempt: u32 },
    Ready(PriceHistorySeries),
    /// Fetch `attempt` failed. `retry_in` is `None` when no retry is scheduled.
    Failed {
        kind: FailureKind,
        message: String,
        attempt: u32,
        retry_in: Option<Duration>,
    },
}

impl HistoryViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, HistoryViewState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, HistoryViewState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, HistoryViewState::Failed { .. })
    }

    pub fn series(&self) -> Option<&PriceHistorySeries> {
        match self {
            HistoryViewState::Ready(series) => Some(series),
            _ => None,
        }
    }
}

/// Controller for one symbol's chart.
///
/// Owns a background task while loading or waiting to retry. `close()` or
/// dropping the view cancels that task; a response arriving after close is
/// never published.
pub struct HistoryView {
    symbol: Symbol,
    state_rx: watch::Receiver<HistoryViewState>,
    /// Bumped on close; the task only publishes while it matches its own copy.
    generation: Arc<AtomicU64>,
    task_handle: Option<JoinHandle<()>>,
}

impl HistoryView {
    /// Open a view for `symbol`. Must be called from within a tokio runtime.
    pub async fn open(store: SyncStore, symbol: Symbol, retry: RetryPolicy) -> Self {
        let generation = Arc::new(AtomicU64::new(0));

        if let Some(series) = store.cached_history(&symbol).await {
            tracing::debug!("History view for {} opened from cache", symbol);
            let (_tx, state_rx) = watch::channel(HistoryViewState::Ready(series));
            return Self {
                symbol,
                state_rx,
                generation,
                task_handle: None,
            };
        }

        tracing::info!("History view for {} opened, loading", symbol);
        let (state_tx, state_rx) = watch::channel(HistoryViewState::Loading { attempt: 1 });
        let task = ViewTask {
            store,
            symbol: symbol.clone(),
            retry,
            state_tx,
            generation: Arc::clone(&generation),
            epoch: 0,
        };
        let handle = tokio::spawn(task.run());

        Self {
            symbol,
            state_rx,
            generation,
            task_handle: Some(handle),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Current state (cloned).
    pub fn state(&self) -> HistoryViewState {
        self.state_rx.borrow().clone()
    }

    /// A receiver that observes every state change of this view.
    pub fn subscribe(&self) -> watch::Receiver<HistoryViewState> {
        self.state_rx.clone()
    }

    /// Whether a fetch or a retry timer is still pending.
    pub fn is_active(&self) -> bool {
        self.task_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Cancel any pending fetch or retry. The last published state is kept.
    pub fn close(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            tracing::info!("History view for {} closed", self.symbol);
        }
    }
}

impl Drop for HistoryView {
    fn drop(&mut self) {
        self.close();
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

struct ViewTask {
    store: SyncStore,
    symbol: Symbol,
    retry: RetryPolicy,
    state_tx: watch::Sender<HistoryViewState>,
    generation: Arc<AtomicU64>,
    epoch: u64,
}

impl ViewTask {
    fn is_live(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.epoch
    }

    /// Publish `state` unless the owning view has been closed.
    fn publish(&self, state: HistoryViewState) -> bool {
        if !self.is_live() {
            tracing::debug!("Dropping stale update for {}", self.symbol);
            return false;
        }
        self.state_tx.send_replace(state);
        true
    }

    async fn run(self) {
        let mut attempt: u32 = 1;

        loop {
            let result = self.store.ensure_history(&self.symbol).await;

            let err = match result {
                Ok(series) => {
                    self.publish(HistoryViewState::Ready(series));
                    return;
                }
                Err(e) => e,
            };

            let kind = FailureKind::of(&err);
            let retry_in = self.retry.delay_after(attempt);
            tracing::warn!(
                attempt,
                retry_in_ms = retry_in.map(|d| d.as_millis() as u64),
                "History fetch for {} failed: {}",
                self.symbol,
                err
            );

            let published = self.publish(HistoryViewState::Failed {
                kind,
                message: kind.message().to_string(),
                attempt,
                retry_in,
            });
            let Some(delay) = retry_in else { return };
            if !published {
                return;
            }

            tokio::time::sleep(delay).await;

            attempt = attempt.saturating_add(1);
            if !self.publish(HistoryViewState::Loading { attempt }) {
                return;
            }
        }
    }
}
