//! Scripted in-memory gateway shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use coinwatch::domain::coin::Coin;
use coinwatch::domain::price_history::PricePoint;
use coinwatch::error::{HttpError, SyncError};
use coinwatch::gateway::PriceGateway;
use coinwatch::shared::Symbol;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

const KNOWN: [&str; 10] = [
    "btc", "eth", "xrp", "ltc", "bch", "ada", "dot", "doge", "bnb", "link",
];

#[derive(Default)]
pub struct ScriptedGateway {
    coins: Mutex<Vec<Result<Vec<Coin>, u16>>>,
    histories: Mutex<HashMap<Symbol, Result<Vec<PricePoint>, u16>>>,
    bulk_calls: AtomicUsize,
    history_calls: Mutex<HashMap<Symbol, usize>>,
    history_gate: Option<Arc<Semaphore>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gated(gate: Arc<Semaphore>) -> Arc<Self> {
        Arc::new(Self {
            history_gate: Some(gate),
            ..Self::default()
        })
    }

    /// Queue a bulk response. The last queued response repeats forever.
    pub fn push_coins(&self, result: Result<Vec<Coin>, u16>) {
        self.coins.lock().unwrap().push(result);
    }

    pub fn set_history(&self, symbol: &str, result: Result<Vec<(i64, f64)>, u16>) {
        let result = result.map(|pts| {
            pts.into_iter()
                .map(|(t, p)| PricePoint::new(t, p))
                .collect()
        });
        self.histories
            .lock()
            .unwrap()
            .insert(Symbol::new(symbol), result);
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self, symbol: &str) -> usize {
        self.history_calls
            .lock()
            .unwrap()
            .get(&Symbol::new(symbol))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl PriceGateway for ScriptedGateway {
    async fn fetch_bulk_prices(&self, symbols: &[Symbol]) -> Result<Vec<Coin>, SyncError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut queue = self.coins.lock().unwrap();
            if queue.len() > 1 {
                Some(queue.remove(0))
            } else {
                queue.first().cloned()
            }
        };
        match next {
            Some(Ok(coins)) => Ok(coins
                .into_iter()
                .filter(|c| symbols.contains(&c.symbol))
                .collect()),
            Some(Err(status)) => Err(HttpError::from_status(status, String::new()).into()),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        _window_days: u32,
    ) -> Result<Vec<PricePoint>, SyncError> {
        if !KNOWN.contains(&symbol.as_str()) {
            return Err(SyncError::UnknownSymbol {
                symbol: symbol.to_string(),
            });
        }
        *self
            .history_calls
            .lock()
            .unwrap()
            .entry(symbol.clone())
            .or_default() += 1;
        if let Some(gate) = &self.history_gate {
            gate.acquire()
                .await
                .map_err(|e| SyncError::Validation(e.to_string()))?
                .forget();
        }
        let scripted = self.histories.lock().unwrap().get(symbol).cloned();
        match scripted {
            Some(Ok(points)) => Ok(points),
            Some(Err(status)) => Err(HttpError::from_status(status, String::new()).into()),
            None => Err(HttpError::from_status(404, String::new()).into()),
        }
    }
}

pub fn coin(symbol: &str, name: &str, price: f64) -> Coin {
    Coin::new(symbol, name, price)
}

/// Give spawned tasks a chance to run up to their next suspension point.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
