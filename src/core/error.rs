//! Error types for fetching and converting quotes

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuoteError>;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response: {reason}; body: {body}")]
    Decode { reason: String, body: String },

    #[error("rate API reported {result:?}: {body}")]
    Api { result: String, body: String },

    #[error("currency {currency} not found for base {base}; available: {}", .available.join(", "))]
    CurrencyNotFound {
        currency: String,
        base: String,
        available: Vec<String>,
    },

    #[error("cannot derive a quote currency from symbol {0:?}")]
    SymbolFormat(String),

    #[error("crypto quote currency ({derived}) does not match rate base currency ({base})")]
    CurrencyMismatch { derived: String, base: String },

    #[error("failed to parse price {price:?}: {source}")]
    ParsePrice {
        price: String,
        source: std::num::ParseFloatError,
    },
}
