//! Price history cache, one immutable series per fetched symbol.

use super::PriceHistorySeries;
use crate::shared::Symbol;
use std::collections::HashMap;

/// Fetched price histories keyed by symbol.
///
/// Absence of a key means "not yet fetched", never "empty series". Entries are
/// not invalidated for the lifetime of the cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryCache {
    data: HashMap<Symbol, PriceHistorySeries>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly fetched series. Keeps the first series for a symbol.
    ///
    /// Returns the series now held for that symbol.
    pub fn insert(&mut self, series: PriceHistorySeries) -> &PriceHistorySeries {
        self.data.entry(series.symbol.clone()).or_insert(series)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&PriceHistorySeries> {
        self.data.get(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.data.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.data.keys()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
