//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types; conversion to domain types
//! happens in the [`PriceGateway`] impl at the bottom of this file.

use crate::domain::coin::wire::MarketCoinResponse;
use crate::domain::coin::Coin;
use crate::domain::price_history::wire::MarketChartResponse;
use crate::domain::price_history::PricePoint;
use crate::error::{HttpError, SyncError};
use crate::gateway::PriceGateway;
use crate::network::{DEFAULT_REQUEST_TIMEOUT, VS_CURRENCY};
use crate::shared::universe::upstream_id;
use crate::shared::Symbol;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko v3 REST API.
///
/// Every request is issued exactly once; there is no retry at this layer.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
}

impl CoinGeckoHttp {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub fn markets_url(&self, ids: &[&str]) -> String {
        let ids: Vec<_> = ids.iter().map(|id| urlencoding::encode(id)).collect();
        format!(
            "{}/coins/markets?vs_currency={}&ids={}",
            self.base_url,
            VS_CURRENCY,
            ids.join(",")
        )
    }

    pub async fn get_markets(&self, ids: &[&str]) -> Result<Vec<MarketCoinResponse>, SyncError> {
        self.get(&self.markets_url(ids)).await
    }

    // ── Market chart ─────────────────────────────────────────────────────

    pub fn market_chart_url(&self, id: &str, days: u32) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(id),
            VS_CURRENCY,
            days
        )
    }

    pub async fn get_market_chart(
        &self,
        id: &str,
        days: u32,
    ) -> Result<MarketChartResponse, SyncError> {
        self.get(&self.market_chart_url(id, days)).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, SyncError> {
        tracing::debug!("GET {}", url);

        let resp = self.client.get(url).send().await.map_err(map_transport)?;
        let status = resp.status();

        if status.is_success() {
            let body_text = resp.text().await.map_err(map_transport)?;
            return decode_body(&body_text);
        }

        let body_text = resp.text().await.unwrap_or_default();
        Err(HttpError::from_status(status.as_u16(), body_text).into())
    }
}

/// A 2xx body that does not match the wire type is a `Serde` error, not a
/// transport one.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Malformed response body: {}", e);
        SyncError::Serde(e)
    })
}

fn map_transport(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

#[async_trait]
impl PriceGateway for CoinGeckoHttp {
    async fn fetch_bulk_prices(&self, symbols: &[Symbol]) -> Result<Vec<Coin>, SyncError> {
        let ids: Vec<&str> = symbols
            .iter()
            .filter_map(|s| {
                let id = upstream_id(s);
                if id.is_none() {
                    tracing::warn!("No upstream id for {}, skipping", s);
                }
                id
            })
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self.get_markets(&ids).await?;
        let mut coins = Vec::with_capacity(resp.len());
        for entry in resp {
            match Coin::try_from(entry) {
                Ok(coin) => coins.push(coin),
                Err(e) => tracing::warn!("Dropping market entry: {}", e),
            }
        }
        Ok(coins)
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        window_days: u32,
    ) -> Result<Vec<PricePoint>, SyncError> {
        let id = upstream_id(symbol).ok_or_else(|| SyncError::UnknownSymbol {
            symbol: symbol.to_string(),
        })?;
        let resp = self.get_market_chart(id, window_days).await?;
        Ok(resp.into())
    }
}
