//! HTTP client layer — `CoinGeckoHttp`, the default [`PriceGateway`](crate::gateway::PriceGateway).

pub mod client;

pub use client::CoinGeckoHttp;
