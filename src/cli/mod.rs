//! Command-line interface
//!
//! Parses `obcli` subcommands and dispatches them to an [`OrderBookClient`].

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::auth::StaticCredentials;
use crate::config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::ObsrvError;
use crate::rest::{
    MarketAddRequest, OrderAddRequest, OrderBookClient, OrderCancelRequest, OrderModifyRequest,
};
use crate::types::{BookDepth, BookType};

/// Exit status for missing or invalid arguments and unknown commands.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "obsrv_client=warn";

/// Load `.env` into the environment and build the log filter from it.
///
/// `.env` is loaded first so that a `RUST_LOG` set there takes effect.
pub fn init_environment() -> EnvFilter {
    dotenv::dotenv().ok();
    log_filter(LOG_FILTER_VAR)
}

/// Log filter from the given variable, falling back to warnings from this crate.
pub fn log_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// obsrv command-line client
#[derive(Parser, Debug)]
#[command(name = "obcli")]
#[command(about = "Command-line client for the obsrv order-matching server")]
#[command(version)]
pub struct Cli {
    /// Server host
    #[arg(long, env = "OBSRV_HOST", default_value = DEFAULT_HOST, global = true)]
    pub host: String,

    /// Server port
    #[arg(long, env = "OBSRV_PORT", default_value_t = DEFAULT_PORT, global = true)]
    pub port: u16,

    /// Username for authenticated commands
    #[arg(long, env = "OBSRV_USERNAME", global = true)]
    pub username: Option<String>,

    /// Shared secret for authenticated commands
    #[arg(long, env = "OBSRV_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "OBSRV_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration described by the global options.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.host, self.port);
        config.timeout = self.timeout.map(Duration::from_secs);
        if let (Some(username), Some(secret)) = (&self.username, &self.secret) {
            config.credentials = Some(Arc::new(StaticCredentials::new(username, secret)));
        }
        config
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show server info
    Info,
    /// Show all markets
    #[command(name = "market.list")]
    MarketList,
    /// Add new market
    #[command(name = "market.add")]
    MarketAdd(MarketAddArgs),
    /// Show order book
    Book(BookArgs),
    /// Show info on a single order
    Order(OrderIdArgs),
    /// Cancel a single order
    #[command(name = "order.cancel")]
    OrderCancel(OrderIdArgs),
    /// Modify a single order
    #[command(name = "order.modify")]
    OrderModify(OrderModifyArgs),
    /// Add new order
    #[command(name = "order.add")]
    OrderAdd(OrderAddArgs),
}

/// Arguments for market.add
#[derive(Args, Debug)]
pub struct MarketAddArgs {
    /// Market symbol
    pub symbol: String,

    /// Order book type: simple or depth
    #[arg(default_value_t = BookType::Simple.to_string())]
    pub booktype: String,
}

impl From<MarketAddArgs> for MarketAddRequest {
    fn from(args: MarketAddArgs) -> Self {
        MarketAddRequest::new(args.symbol).book_type_name(args.booktype)
    }
}

/// Arguments for book
#[derive(Args, Debug)]
pub struct BookArgs {
    /// Market symbol
    pub symbol: String,

    /// Detail level: 1 (best bid/ask), 2 (aggregated) or 3 (every order)
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub depth: u8,
}

/// Arguments for commands taking a single order id
#[derive(Args, Debug)]
pub struct OrderIdArgs {
    /// Order id
    pub order_id: String,
}

/// Arguments for order.modify
#[derive(Args, Debug)]
pub struct OrderModifyArgs {
    /// Order id
    pub order_id: String,

    /// New price
    #[arg(allow_negative_numbers = true)]
    pub price: i64,

    /// Signed change to the order quantity
    #[arg(allow_negative_numbers = true)]
    pub qty_delta: i64,
}

impl From<OrderModifyArgs> for OrderModifyRequest {
    fn from(args: OrderModifyArgs) -> Self {
        OrderModifyRequest::new(args.order_id, args.price, args.qty_delta)
    }
}

/// Arguments for order.add
#[derive(Args, Debug)]
pub struct OrderAddArgs {
    /// Order as JSON, e.g. '{"symbol":"GOOG","is_buy":true,"price":1000,"qty":10}'
    #[arg(value_parser = parse_order_json)]
    pub order: OrderAddRequest,
}

fn parse_order_json(raw: &str) -> Result<OrderAddRequest, String> {
    serde_json::from_str(raw)
        .and_then(OrderAddRequest::from_json)
        .map_err(|e| format!("invalid order JSON: {e}"))
}

/// Parse command-line arguments, exiting on error.
///
/// Usage errors exit with [`USAGE_EXIT_CODE`]; `--help` and `--version`
/// exit successfully.
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Run one command against the client and return the result as JSON.
///
/// An absent resource (404) yields `Value::Null`.
pub async fn execute<C: OrderBookClient>(client: &C, command: Commands) -> Result<Value, ObsrvError> {
    let output = match command {
        Commands::Info => serde_json::to_value(client.info().await?)?,
        Commands::MarketList => serde_json::to_value(client.market_list().await?)?,
        Commands::MarketAdd(args) => {
            let request = MarketAddRequest::from(args);
            if !request.has_valid_symbol() {
                tracing::warn!(symbol = %request.symbol, "symbol will likely be rejected by the server");
            }
            if request.known_book_type().is_none() {
                tracing::warn!(booktype = %request.booktype, "unknown book type");
            }
            serde_json::to_value(client.market_add(&request).await?)?
        }
        Commands::Book(args) => {
            let depth = BookDepth::new(args.depth).unwrap_or_default();
            serde_json::to_value(client.book(&args.symbol, depth).await?)?
        }
        Commands::Order(args) => serde_json::to_value(client.order_info(&args.order_id).await?)?,
        Commands::OrderCancel(args) => {
            let request = OrderCancelRequest::new(args.order_id);
            serde_json::to_value(client.order_cancel(&request).await?)?
        }
        Commands::OrderModify(args) => {
            let request = OrderModifyRequest::from(args);
            serde_json::to_value(client.order_modify(&request).await?)?
        }
        Commands::OrderAdd(args) => serde_json::to_value(client.order_add(&args.order).await?)?,
    };
    Ok(output)
}
