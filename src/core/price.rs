//! Spot-price abstractions and core types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

fn default_base_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_path() -> String {
    "/api/v3/ticker/price".to_string()
}

fn default_source() -> String {
    "binance".to_string()
}

fn default_symbol_param() -> String {
    "symbol".to_string()
}

/// Describes how to build a ticker request against one exchange.
///
/// The defaults point at Binance's public price endpoint. Other exchanges
/// differ only in the path and the name of the symbol query parameter
/// (e.g. OKX uses `instId`, Coinbase uses `product_id`).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeEndpoint {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_symbol_param")]
    pub symbol_param: String,
}

impl Default for ExchangeEndpoint {
    fn default() -> Self {
        ExchangeEndpoint {
            base_url: default_base_url(),
            path: default_path(),
            source: default_source(),
            symbol_param: default_symbol_param(),
        }
    }
}

/// Latest spot price for one trading pair.
///
/// The price is kept as the exchange's decimal string so no precision is
/// lost before the caller decides how to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotPrice {
    pub symbol: String,
    pub price: String,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Fetches the latest price for a trading pair, e.g. "BTCUSDT".
    async fn fetch_price(&self, symbol: &str) -> Result<SpotPrice>;

    fn name(&self) -> &str;

    /// Whether `symbol` is well-formed for this exchange.
    fn validate_symbol(&self, symbol: &str) -> bool;
}
