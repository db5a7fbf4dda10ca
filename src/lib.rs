//! # coinwatch
//!
//! Client-side price synchronization for a cryptocurrency dashboard.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Symbols, the tracked universe, domain models (always available)
//! 2. **Gateway** — `PriceGateway` trait; `CoinGeckoHttp` is the reqwest-backed implementation
//! 3. **Sync** — `SyncStore` (state + fetch-if-absent), `PollScheduler`, `HistoryView`
//! 4. **High-Level Client** — `CoinwatchClient` with pin/unpin and a builder
//!
//! Rendering is left to the application: it reads the store's selectors and
//! each view's `HistoryViewState`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinwatch::prelude::*;
//!
//! let mut client = CoinwatchClient::builder().build()?;
//! client.start().await;
//!
//! client.pin("btc").await;
//! let mut state = client.view(&Symbol::new("btc")).unwrap().subscribe();
//! state.wait_for(|s| s.is_ready()).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and the tracked universe.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL and timing constants.
pub mod network;

// ── Layer 2: Gateway ─────────────────────────────────────────────────────────

/// The `PriceGateway` seam.
pub mod gateway;

/// CoinGecko HTTP gateway.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Sync ────────────────────────────────────────────────────────────

/// Store, poll scheduler, history views.
pub mod sync;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CoinwatchClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Symbol, TrackedUniverse};

    // Domain types
    pub use crate::domain::coin::Coin;
    pub use crate::domain::price_history::{HistoryCache, PriceHistorySeries, PricePoint};

    // Errors
    pub use crate::error::{HttpError, SyncError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL, DEFAULT_RETRY_DELAY};

    // Gateway
    pub use crate::gateway::PriceGateway;
    #[cfg(feature = "http")]
    pub use crate::http::CoinGeckoHttp;

    // Sync
    pub use crate::sync::{
        FailureKind, HistoryView, HistoryViewState, PollScheduler, PollState, PollStatus,
        RetryPolicy, SyncState, SyncStore,
    };

    // Client
    pub use crate::client::{CoinwatchClient, CoinwatchClientBuilder};
}
