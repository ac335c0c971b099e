pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::providers::binance::BinanceProvider;
use crate::providers::exchangerate::{self, ExchangeRateApiProvider};

#[derive(Debug, Clone, Copy)]
pub enum AppCommand {
    Quote,
    Crypto,
    Fiat,
    Convert,
}

/// Per-invocation overrides for values that otherwise come from the
/// configuration file.
#[derive(Debug, Default)]
pub struct QueryArgs {
    pub pair: Option<String>,
    pub base_currency: Option<String>,
    pub target_currency: Option<String>,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    args: QueryArgs,
) -> Result<()> {
    info!("coinfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let pair = args.pair.unwrap_or_else(|| config.pair.clone());
    let base = args
        .base_currency
        .unwrap_or_else(|| config.base_currency.clone());
    let target = args
        .target_currency
        .unwrap_or_else(|| config.target_currency.clone());

    // One client shared by both providers; reqwest clients are cheap to
    // clone and safe for concurrent use. Timeouts live here, not in the
    // fetch functions.
    let client = reqwest::Client::builder()
        .user_agent(concat!("coinfx/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()?;

    let endpoint = config.providers.binance.clone().unwrap_or_default();
    let price_provider = BinanceProvider::new(client.clone(), endpoint);

    match command {
        AppCommand::Crypto => cli::crypto::run(&price_provider, &pair).await,
        AppCommand::Fiat => {
            let rate_provider = rate_provider(&config, client)?;
            cli::fiat::run(&rate_provider, &base, &target).await
        }
        AppCommand::Quote => {
            let rate_provider = rate_provider(&config, client)?;
            cli::quote::run(&price_provider, &rate_provider, &pair, &base, &target).await
        }
        AppCommand::Convert => {
            let rate_provider = rate_provider(&config, client)?;
            cli::convert::run(&price_provider, &rate_provider, &pair, &base, &target).await
        }
    }
}

fn rate_provider(config: &AppConfig, client: reqwest::Client) -> Result<ExchangeRateApiProvider> {
    let (base_url, api_key) = match config.providers.exchangerate.as_ref() {
        Some(p) => (p.base_url.as_str(), p.api_key.clone()),
        None => (exchangerate::DEFAULT_BASE_URL, None),
    };

    let provider = match api_key {
        Some(key) => ExchangeRateApiProvider::new(client, base_url, key),
        None => ExchangeRateApiProvider::from_env(client, base_url)?,
    };
    Ok(provider)
}
