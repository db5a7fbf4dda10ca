//! Coin domain — the current-price list refreshed on every poll.

mod convert;
pub mod wire;

use crate::shared::Symbol;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A coin with its latest USD price.
///
/// Replaced wholesale on each refresh, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub symbol: Symbol,
    pub name: String,
    pub current_price: f64,
}

impl Coin {
    pub fn new(symbol: impl Into<Symbol>, name: impl Into<String>, current_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            current_price,
        }
    }

    /// Case-insensitive substring match on name or symbol.
    ///
    /// The term is used as typed: an empty term matches every coin, but
    /// surrounding whitespace is part of the needle.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.symbol.as_str().contains(&term)
    }
}

/// Rejected upstream coin entries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Coin {0} has no current price")]
    MissingPrice(String),
}
