//! Conversions from wire types to domain types for price history.

use super::wire::MarketChartResponse;
use super::PricePoint;

impl From<(f64, f64)> for PricePoint {
    fn from((t, price): (f64, f64)) -> Self {
        Self {
            timestamp_ms: t as i64,
            price,
        }
    }
}

impl From<MarketChartResponse> for Vec<PricePoint> {
    fn from(r: MarketChartResponse) -> Self {
        r.prices.into_iter().map(PricePoint::from).collect()
    }
}
