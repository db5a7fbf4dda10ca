//! Wire types for `/coins/{id}/market_chart` (REST).

use serde::{Deserialize, Serialize};

/// `/coins/{id}/market_chart` payload.
///
/// Each entry is `[timestamp_ms, price]`. `market_caps` and `total_volumes`
/// are present upstream but unused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
}
