//! Poll scheduler. Refreshes the coin list at start and then on a fixed interval.
//!
//! Refresh failures are logged and otherwise ignored: the next tick is the retry.

use super::store::SyncStore;
use crate::network::DEFAULT_POLL_INTERVAL;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

/// Diagnostic counters. Not an error channel: failures are never surfaced to
/// the user, only counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollStatus {
    pub ticks: u64,
    pub failures: u64,
    pub last_success: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Counters {
    ticks: AtomicU64,
    failures: AtomicU64,
    /// Unix millis of the last successful refresh; 0 = never.
    last_success_ms: AtomicI64,
}

/// Drives [`SyncStore::refresh_coins`] from a background tokio task.
///
/// `start`/`stop` must be called from within a tokio runtime. Dropping the
/// scheduler stops it.
pub struct PollScheduler {
    store: SyncStore,
    interval: Duration,
    task_handle: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl PollScheduler {
    pub fn new(store: SyncStore) -> Self {
        Self::with_interval(store, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(store: SyncStore, interval: Duration) -> Self {
        Self {
            store,
            interval,
            task_handle: None,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `Idle → Polling`. The first refresh runs immediately. No-op while polling.
    pub fn start(&mut self) {
        if self.state() == PollState::Polling {
            return;
        }

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Poll scheduler started");
        let handle = tokio::spawn(run_polling(
            self.store.clone(),
            self.interval,
            Arc::clone(&self.counters),
        ));
        self.task_handle = Some(handle);
    }

    /// `Polling → Idle`. Cancels the pending tick and any refresh in flight.
    pub fn stop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            tracing::info!("Poll scheduler stopped");
        }
    }

    pub fn state(&self) -> PollState {
        match &self.task_handle {
            Some(handle) if !handle.is_finished() => PollState::Polling,
            _ => PollState::Idle,
        }
    }

    pub fn status(&self) -> PollStatus {
        let ms = self.counters.last_success_ms.load(Ordering::SeqCst);
        PollStatus {
            ticks: self.counters.ticks.load(Ordering::SeqCst),
            failures: self.counters.failures.load(Ordering::SeqCst),
            last_success: if ms == 0 {
                None
            } else {
                Utc.timestamp_millis_opt(ms).single()
            },
        }
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_polling(store: SyncStore, period: Duration, counters: Arc<Counters>) {
    let mut ticker = tokio::time::interval(period);
    // A slow refresh pushes the next tick back instead of bursting.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately.
        ticker.tick().await;
        counters.ticks.fetch_add(1, Ordering::SeqCst);

        match store.refresh_coins().await {
            Ok(_) => {
                counters
                    .last_success_ms
                    .store(Utc::now().timestamp_millis(), Ordering::SeqCst);
            }
            Err(e) => {
                counters.failures.fetch_add(1, Ordering::SeqCst);
                tracing::warn!("Background coin refresh failed: {}", e);
            }
        }
    }
}
