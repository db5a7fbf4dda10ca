//! Symbols this crate can map to upstream coin ids.

use super::Symbol;
use crate::error::SyncError;
use std::collections::HashMap;

/// Symbol → CoinGecko id, in display order.
pub const TRACKED_COINS: [(&str, &str); 10] = [
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("xrp", "ripple"),
    ("ltc", "litecoin"),
    ("bch", "bitcoin-cash"),
    ("ada", "cardano"),
    ("dot", "polkadot"),
    ("doge", "dogecoin"),
    ("bnb", "binancecoin"),
    ("link", "chainlink"),
];

lazy_static::lazy_static! {
    static ref UPSTREAM_IDS: HashMap<&'static str, &'static str> =
        TRACKED_COINS.iter().copied().collect();
}

/// Upstream id for a symbol, if it is one of the ten known coins.
pub fn upstream_id(symbol: &Symbol) -> Option<&'static str> {
    UPSTREAM_IDS.get(symbol.as_str()).copied()
}

/// The set of symbols refreshed on every poll.
///
/// Always a subset of [`TRACKED_COINS`]; order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedUniverse {
    symbols: Vec<Symbol>,
}

impl Default for TrackedUniverse {
    fn default() -> Self {
        Self {
            symbols: TRACKED_COINS.iter().map(|(s, _)| Symbol::new(s)).collect(),
        }
    }
}

impl TrackedUniverse {
    /// Build a narrower universe. Every symbol must have an upstream id;
    /// duplicates are collapsed.
    pub fn new<I, S>(symbols: I) -> Result<Self, SyncError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut out: Vec<Symbol> = Vec::new();
        for s in symbols {
            let symbol = s.into();
            if upstream_id(&symbol).is_none() {
                return Err(SyncError::UnknownSymbol {
                    symbol: symbol.to_string(),
                });
            }
            if !out.contains(&symbol) {
                out.push(symbol);
            }
        }
        Ok(Self { symbols: out })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
