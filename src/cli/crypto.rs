use super::quote::{price_row, quote_table};
use super::ui;
use crate::core::price::SpotPriceProvider;
use anyhow::Result;
use tracing::warn;

pub async fn run(price_provider: &dyn SpotPriceProvider, pair: &str) -> Result<()> {
    if !price_provider.validate_symbol(pair) {
        warn!(
            "{} does not look like a {} trading pair",
            pair,
            price_provider.name()
        );
    }

    let pb = ui::new_spinner();
    pb.set_message(format!("Fetching {pair}..."));
    let price = price_provider.fetch_price(pair).await;
    pb.finish_and_clear();

    println!("{}", quote_table(vec![price_row(&price?)]));
    Ok(())
}
