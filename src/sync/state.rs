//! `SyncState` — the root aggregate every view reads from.

use crate::domain::coin::Coin;
use crate::domain::price_history::{HistoryCache, PriceHistorySeries};
use crate::shared::Symbol;

/// Coins, pinned symbols and fetched histories.
///
/// Only [`SyncStore`](super::SyncStore) mutates this; everyone else gets a clone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    coins: Vec<Coin>,
    /// Pin order, unique.
    selected: Vec<Symbol>,
    histories: HistoryCache,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Selectors ────────────────────────────────────────────────────────

    /// Coins in the order of the last successful refresh.
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn coin(&self, symbol: &Symbol) -> Option<&Coin> {
        self.coins.iter().find(|c| &c.symbol == symbol)
    }

    /// Pinned symbols in pin order.
    pub fn selected(&self) -> &[Symbol] {
        &self.selected
    }

    pub fn is_selected(&self, symbol: &Symbol) -> bool {
        self.selected.contains(symbol)
    }

    /// Current coin values for every pinned symbol still listed in `coins`.
    pub fn selected_coins(&self) -> Vec<Coin> {
        self.selected
            .iter()
            .filter_map(|s| self.coin(s).cloned())
            .collect()
    }

    pub fn histories(&self) -> &HistoryCache {
        &self.histories
    }

    pub fn history(&self, symbol: &Symbol) -> Option<&PriceHistorySeries> {
        self.histories.get(symbol)
    }

    /// Coins whose name or symbol contains `term`, case-insensitively.
    pub fn search(&self, term: &str) -> Vec<Coin> {
        self.coins.iter().filter(|c| c.matches(term)).cloned().collect()
    }

    // ── Mutations (store only) ───────────────────────────────────────────

    pub(crate) fn replace_coins(&mut self, coins: Vec<Coin>) {
        self.coins = coins;
    }

    /// Pin `symbol` if it is listed and not already pinned.
    pub(crate) fn select(&mut self, symbol: &Symbol) -> bool {
        if self.is_selected(symbol) || self.coin(symbol).is_none() {
            return false;
        }
        self.selected.push(symbol.clone());
        true
    }

    pub(crate) fn remove(&mut self, symbol: &Symbol) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != symbol);
        before != self.selected.len()
    }

    pub(crate) fn insert_history(&mut self, series: PriceHistorySeries) -> &PriceHistorySeries {
        self.histories.insert(series)
    }
}
