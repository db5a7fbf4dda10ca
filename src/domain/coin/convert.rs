//! Conversions from wire types to domain types for coins.

use super::wire::MarketCoinResponse;
use super::{Coin, ValidationError};

impl TryFrom<MarketCoinResponse> for Coin {
    type Error = ValidationError;

    fn try_from(c: MarketCoinResponse) -> Result<Self, Self::Error> {
        let current_price = c
            .current_price
            .ok_or_else(|| ValidationError::MissingPrice(c.symbol.to_string()))?;
        Ok(Self {
            symbol: c.symbol,
            name: c.name,
            current_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markets_payload_converts_in_order() {
        let json = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":50000,"market_cap":1},
            {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3000.5}
        ]"#;
        let wire: Vec<MarketCoinResponse> = serde_json::from_str(json).unwrap();
        let coins: Vec<Coin> = wire.into_iter().map(|c| c.try_into().unwrap()).collect();
        assert_eq!(
            coins,
            vec![
                Coin::new("btc", "Bitcoin", 50_000.0),
                Coin::new("eth", "Ethereum", 3_000.5),
            ]
        );
    }

    #[test]
    fn test_null_price_is_rejected() {
        let wire: MarketCoinResponse = serde_json::from_str(
            r#"{"id":"dogecoin","symbol":"doge","name":"Dogecoin","current_price":null}"#,
        )
        .unwrap();
        let err = Coin::try_from(wire).unwrap_err();
        assert_eq!(err, ValidationError::MissingPrice("doge".into()));
    }
}
