use super::quote::{quote_table, rate_row};
use super::ui;
use crate::core::rate::FiatRateProvider;
use anyhow::Result;

pub async fn run(
    rate_provider: &dyn FiatRateProvider,
    base_currency: &str,
    target_currency: &str,
) -> Result<()> {
    let pb = ui::new_spinner();
    pb.set_message(format!("Fetching {base_currency}/{target_currency}..."));
    let rate = rate_provider.fetch_rate(base_currency, target_currency).await;
    pb.finish_and_clear();

    println!("{}", quote_table(vec![rate_row(&rate?)]));
    Ok(())
}
