//! obcli - command-line client for the obsrv order-matching server
//!
//! Provides commands for:
//! - `info`, `market.list`, `book`: public market data
//! - `market.add`: create a market
//! - `order`, `order.add`, `order.cancel`, `order.modify`: order management

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*};

use obsrv_client::cli;
use obsrv_client::rest::ObsrvClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env and initialize logging
    let filter = cli::init_environment();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Parse CLI arguments
    let cli = cli::parse_or_exit();

    // Execute command
    let client = ObsrvClient::new(cli.client_config())?;
    let output = cli::execute(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
