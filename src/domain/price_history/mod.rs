//! Price history domain — the 30-day line chart series per coin.

mod convert;
pub mod state;
pub mod wire;

use crate::shared::Symbol;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub use state::HistoryCache;

/// A single data point on a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    /// USD price.
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }
}

/// Ordered price points for one symbol, as returned by the upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistorySeries {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
}

impl PriceHistorySeries {
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Self {
        Self { symbol, points }
    }

    /// X axis: calendar date (UTC) of each point.
    ///
    /// Points with an out-of-range timestamp are skipped, so `labels()` may be
    /// shorter than `values()` only for corrupt upstream data.
    pub fn labels(&self) -> Vec<NaiveDate> {
        self.points
            .iter()
            .filter_map(|p| p.datetime().map(|dt| dt.date_naive()))
            .collect()
    }

    /// Y axis: price of each point.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
