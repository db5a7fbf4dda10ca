//! Wire types for `/coins/markets` (REST).

use crate::shared::Symbol;
use serde::{Deserialize, Serialize};

/// One entry of the `/coins/markets` array.
///
/// Only the fields the dashboard consumes; the rest of the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketCoinResponse {
    #[serde(default)]
    pub id: String,
    pub symbol: Symbol,
    pub name: String,
    pub current_price: Option<f64>,
}
