use super::ui;
use crate::core::error::Result;
use crate::core::price::{SpotPrice, SpotPriceProvider};
use crate::core::rate::{FiatRate, FiatRateProvider};
use comfy_table::Cell;
use futures::future::join;
use tracing::warn;

pub(crate) fn price_row(price: &SpotPrice) -> Vec<Cell> {
    vec![
        Cell::new(&price.symbol),
        Cell::new(&price.price),
        Cell::new(&price.source),
        Cell::new(price.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ]
}

pub(crate) fn rate_row(rate: &FiatRate) -> Vec<Cell> {
    vec![
        Cell::new(format!("{}/{}", rate.base_currency, rate.quote_currency)),
        Cell::new(format!("{:.4}", rate.rate)),
        Cell::new(&rate.source),
        Cell::new(rate.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ]
}

pub(crate) fn quote_table(rows: Vec<Vec<Cell>>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Quote"),
        ui::header_cell("Value"),
        ui::header_cell("Source"),
        ui::header_cell("Fetched (UTC)"),
    ]);
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Fetches the spot price and the fiat rate concurrently. The two
/// requests share no state, so neither waits on the other.
pub(crate) async fn fetch_both(
    price_provider: &dyn SpotPriceProvider,
    rate_provider: &dyn FiatRateProvider,
    pair: &str,
    base_currency: &str,
    target_currency: &str,
) -> Result<(SpotPrice, FiatRate)> {
    if !price_provider.validate_symbol(pair) {
        warn!(
            "{} does not look like a {} trading pair",
            pair,
            price_provider.name()
        );
    }

    let pb = ui::new_spinner();
    pb.set_message(format!(
        "Fetching {pair} and {base_currency}/{target_currency}..."
    ));

    let (price, rate) = join(
        price_provider.fetch_price(pair),
        rate_provider.fetch_rate(base_currency, target_currency),
    )
    .await;
    pb.finish_and_clear();

    Ok((price?, rate?))
}

pub async fn run(
    price_provider: &dyn SpotPriceProvider,
    rate_provider: &dyn FiatRateProvider,
    pair: &str,
    base_currency: &str,
    target_currency: &str,
) -> anyhow::Result<()> {
    let (price, rate) = fetch_both(
        price_provider,
        rate_provider,
        pair,
        base_currency,
        target_currency,
    )
    .await?;

    println!("{}", quote_table(vec![price_row(&price), rate_row(&rate)]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_quote_table_contains_records() {
        let price = SpotPrice {
            symbol: "BTCUSDT".to_string(),
            price: "65000.50".to_string(),
            source: "binance".to_string(),
            fetched_at: Utc::now(),
        };
        let rate = FiatRate {
            base_currency: "USD".to_string(),
            quote_currency: "CNY".to_string(),
            rate: 7.2,
            source: "v6.exchangerate-api.com".to_string(),
            fetched_at: Utc::now(),
        };

        let rendered = quote_table(vec![price_row(&price), rate_row(&rate)]);
        assert!(rendered.contains("BTCUSDT"));
        assert!(rendered.contains("65000.50"));
        assert!(rendered.contains("USD/CNY"));
        assert!(rendered.contains("7.2000"));
    }
}
