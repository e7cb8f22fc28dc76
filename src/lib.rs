//! # obsrv Client
//!
//! An async Rust client library and CLI for the obsrv order-matching HTTP API.
//!
//! ## Features
//!
//! - Typed async methods for every server endpoint
//! - `cscpp1-sha256` (HMAC-SHA256) request signing
//! - Absent resources (HTTP 404) surfaced as `Ok(None)` rather than errors
//! - `obcli` command-line wrapper
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use obsrv_client::rest::ObsrvClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ObsrvClient::builder().host("127.0.0.1").port(7979).build()?;
//!     let markets = client.market_list().await?;
//!     println!("Markets: {:?}", markets);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use config::ClientConfig;
pub use error::ObsrvError;
pub use rest::{ObsrvClient, OrderBookClient};
pub use types::common::{BookDepth, BookType, PriceLevel, Side};

/// Result type alias using ObsrvError
pub type Result<T> = std::result::Result<T, ObsrvError>;
