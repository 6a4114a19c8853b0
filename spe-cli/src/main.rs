//! SPE CLI - Command line tool for the Smart Pricing Engine API.

use std::time::Duration;

use clap::Parser;
use spe_cmd::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(
    name = "spe-cli",
    version,
    about = "Smart Pricing Engine toolkit"
)]
struct Cli {
    /// Base URL of the pricing API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: spe_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using pricing API at {}", cli.api_url);
    let config = ApiConfig::new(cli.api_url, Duration::from_secs(cli.timeout_secs));
    spe_cmd::run(cli.command, config).await
}
