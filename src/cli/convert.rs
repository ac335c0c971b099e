use super::ui;
use super::quote::{fetch_both, price_row, quote_table, rate_row};
use crate::core::convert::convert;
use crate::core::price::SpotPriceProvider;
use crate::core::rate::FiatRateProvider;
use anyhow::Result;

pub async fn run(
    price_provider: &dyn SpotPriceProvider,
    rate_provider: &dyn FiatRateProvider,
    pair: &str,
    base_currency: &str,
    target_currency: &str,
) -> Result<()> {
    let (price, rate) = fetch_both(
        price_provider,
        rate_provider,
        pair,
        base_currency,
        target_currency,
    )
    .await?;

    let converted = convert(&price, &rate)?;

    println!("{}", quote_table(vec![price_row(&price), rate_row(&rate)]));
    println!(
        "\n{} {}",
        ui::style_text(
            &format!("{} ({}):", price.symbol, target_currency),
            ui::StyleType::TotalLabel
        ),
        ui::style_text(&format!("{converted:.2}"), ui::StyleType::TotalValue)
    );
    Ok(())
}
