//! Crypto-to-fiat conversion

use tracing::debug;

use crate::core::error::{QuoteError, Result};
use crate::core::price::SpotPrice;
use crate::core::rate::FiatRate;

/// Converts a crypto spot price into the rate's quote currency.
///
/// The price's quote currency is taken to be the last three characters of
/// its trading symbol and must equal the rate's base currency. Four-letter
/// quote assets such as USDT therefore never match a three-letter fiat
/// code: "BTCUSDT" derives "SDT", not "USD". Callers holding such pairs
/// must supply a rate whose base currency is the truncated suffix.
///
/// No rounding or display formatting is applied to the returned amount.
pub fn convert(price: &SpotPrice, rate: &FiatRate) -> Result<f64> {
    let quote_currency = derive_quote_currency(&price.symbol)?;

    if quote_currency != rate.base_currency {
        return Err(QuoteError::CurrencyMismatch {
            derived: quote_currency.to_string(),
            base: rate.base_currency.clone(),
        });
    }

    let value: f64 = price
        .price
        .parse()
        .map_err(|source| QuoteError::ParsePrice {
            price: price.price.clone(),
            source,
        })?;

    debug!(symbol = %price.symbol, value, rate = rate.rate, "Converting price");
    Ok(value * rate.rate)
}

/// Last three characters of the trading symbol, assuming a 3-letter quote
/// code. Symbols of three or fewer characters carry no base asset.
fn derive_quote_currency(symbol: &str) -> Result<&str> {
    if symbol.len() <= 3 {
        return Err(QuoteError::SymbolFormat(symbol.to_string()));
    }
    symbol
        .get(symbol.len() - 3..)
        .ok_or_else(|| QuoteError::SymbolFormat(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn price(symbol: &str, price: &str) -> SpotPrice {
        SpotPrice {
            symbol: symbol.to_string(),
            price: price.to_string(),
            source: "binance".to_string(),
            fetched_at: Utc::now(),
        }
    }

    fn rate(base: &str, rate_value: f64) -> FiatRate {
        FiatRate {
            base_currency: base.to_string(),
            quote_currency: "CNY".to_string(),
            rate: rate_value,
            source: "test".to_string(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn converts_matching_pair() {
        let converted = convert(&price("BTCUSD", "100"), &rate("USD", 2.0)).unwrap();
        assert_eq!(converted, 200.0);
    }

    #[test]
    fn usdt_pair_mismatches_three_letter_base() {
        // The last-3 derivation yields "SDT" for BTCUSDT, so a USD-based
        // rate is rejected even though a human would expect it to match.
        let result = convert(&price("BTCUSDT", "100"), &rate("USD", 2.0));
        match result {
            Err(QuoteError::CurrencyMismatch { derived, base }) => {
                assert_eq!(derived, "SDT");
                assert_eq!(base, "USD");
            }
            other => panic!("Expected CurrencyMismatch, got {other:?}"),
        }
    }

    #[test]
    fn usdt_pair_matches_truncated_suffix() {
        // Counterpart of the mismatch above: a rate based on the literal
        // "SDT" suffix does convert.
        let converted = convert(&price("BTCUSDT", "65000.50"), &rate("SDT", 7.2)).unwrap();
        assert!((converted - 65000.50 * 7.2).abs() < 1e-9);
    }

    #[test]
    fn short_symbol_is_rejected() {
        let result = convert(&price("BTC", "100"), &rate("BTC", 1.0));
        assert!(matches!(result, Err(QuoteError::SymbolFormat(s)) if s == "BTC"));
    }

    #[test]
    fn malformed_price_is_rejected() {
        let result = convert(&price("BTCUSD", "not-a-number"), &rate("USD", 2.0));
        assert!(matches!(result, Err(QuoteError::ParsePrice { .. })));
    }

    #[test]
    fn preserves_decimal_price_text() {
        let converted = convert(&price("ETHEUR", "2500.25"), &rate("EUR", 1.0)).unwrap();
        assert_eq!(converted, 2500.25);
    }
}
