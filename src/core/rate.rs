//! Fiat exchange-rate abstractions

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Normalized single-pair exchange rate, extracted from a larger rate table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiatRate {
    pub base_currency: String,
    pub quote_currency: String,
    pub rate: f64,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

#[async_trait]
pub trait FiatRateProvider: Send + Sync {
    /// Fetches the rate between two fiat currencies, e.g. USD/CNY.
    async fn fetch_rate(&self, base: &str, quote: &str) -> Result<FiatRate>;

    fn name(&self) -> &str;
}
