//! The seam between the store and the upstream price API.

use crate::domain::coin::Coin;
use crate::domain::price_history::PricePoint;
use crate::error::SyncError;
use crate::shared::Symbol;
use async_trait::async_trait;

/// Read-only access to current prices and price history.
///
/// Implementations are stateless and never retry: a failed call is reported
/// once and the caller decides when to try again.
#[async_trait]
pub trait PriceGateway: Send + Sync {
    /// Current prices for `symbols`, in the order the upstream returns them.
    async fn fetch_bulk_prices(&self, symbols: &[Symbol]) -> Result<Vec<Coin>, SyncError>;

    /// Price points for the last `window_days` days, oldest first.
    ///
    /// Fails with [`SyncError::UnknownSymbol`] before any I/O when the symbol
    /// has no upstream id.
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        window_days: u32,
    ) -> Result<Vec<PricePoint>, SyncError>;
}
