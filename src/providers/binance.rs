use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::{QuoteError, Result};
use crate::core::price::{ExchangeEndpoint, SpotPrice, SpotPriceProvider};

/// Raw ticker payload returned by Binance's public price endpoint.
#[derive(Debug, Deserialize)]
struct TickerResponse {
    symbol: String,
    price: String,
}

// BinanceProvider implementation for SpotPriceProvider
pub struct BinanceProvider {
    client: reqwest::Client,
    endpoint: ExchangeEndpoint,
}

impl BinanceProvider {
    pub fn new(client: reqwest::Client, endpoint: ExchangeEndpoint) -> Self {
        BinanceProvider { client, endpoint }
    }

    fn ticker_url(&self, symbol: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.endpoint.base_url, self.endpoint.path, self.endpoint.symbol_param, symbol
        )
    }
}

#[async_trait]
impl SpotPriceProvider for BinanceProvider {
    #[instrument(
        name = "SpotPriceFetch",
        skip(self),
        fields(symbol = %symbol, source = %self.endpoint.source)
    )]
    async fn fetch_price(&self, symbol: &str) -> Result<SpotPrice> {
        let url = self.ticker_url(symbol);
        debug!("Requesting ticker from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(QuoteError::HttpStatus { status, body });
        }

        let ticker: TickerResponse =
            serde_json::from_str(&body).map_err(|e| QuoteError::Decode {
                reason: e.to_string(),
                body: body.clone(),
            })?;

        Ok(SpotPrice {
            symbol: ticker.symbol,
            price: ticker.price,
            source: self.endpoint.source.clone(),
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        &self.endpoint.source
    }

    /// Binance pairs are 6-12 uppercase letters, no separator, quoted in
    /// one of the majors (USDT, BTC, ETH, BNB).
    fn validate_symbol(&self, symbol: &str) -> bool {
        (6..=12).contains(&symbol.len())
            && symbol.chars().all(|c| c.is_ascii_uppercase())
            && ["USDT", "BTC", "ETH", "BNB"]
                .iter()
                .any(|quote| symbol.ends_with(quote))
    }
}
