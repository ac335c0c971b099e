use anyhow::Result;
use clap::{Parser, Subcommand};
use coinfx::core::log::init_logging;
use coinfx::{AppCommand, QueryArgs};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Trading pair to quote, e.g. BTCUSDT
    #[arg(short, long, global = true)]
    pair: Option<String>,

    /// Base fiat currency for the exchange rate, e.g. USD
    #[arg(short, long, global = true)]
    base: Option<String>,

    /// Target fiat currency, e.g. CNY
    #[arg(short, long, global = true)]
    fiat: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Quote => AppCommand::Quote,
            Commands::Crypto => AppCommand::Crypto,
            Commands::Fiat => AppCommand::Fiat,
            Commands::Convert => AppCommand::Convert,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch the crypto price and the fiat rate (default)
    Quote,
    /// Fetch the cryptocurrency price only
    Crypto,
    /// Fetch the fiat exchange rate only
    Fiat,
    /// Fetch both and print the converted amount
    Convert,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let args = QueryArgs {
        pair: cli.pair,
        base_currency: cli.base,
        target_currency: cli.fiat,
    };

    let result = match cli.command {
        Some(Commands::Setup) => coinfx::cli::setup::setup(),
        Some(cmd) => coinfx::run_command(cmd.into(), cli.config_path.as_deref(), args).await,
        None => coinfx::run_command(AppCommand::Quote, cli.config_path.as_deref(), args).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
