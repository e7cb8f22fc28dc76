//! obsrv REST API client.
//!
//! Provides access to every endpoint of the obsrv order-matching server.
//!
//! # Trait-based API
//!
//! The [`OrderBookClient`] trait abstracts all REST API operations, enabling
//! mock implementations for testing.
//!
//! ```rust,ignore
//! use obsrv_client::rest::{ObsrvClient, OrderBookClient};
//!
//! async fn use_client<C: OrderBookClient>(client: &C) -> Result<(), obsrv_client::ObsrvError> {
//!     let info = client.info().await?;
//!     println!("Server: {:?}", info);
//!     Ok(())
//! }
//! ```

mod client;
pub mod endpoints;
pub mod private;
pub mod public;
mod traits;
pub mod transport;

pub use client::{ObsrvClient, ObsrvClientBuilder};
pub use private::{
    MarketAddRequest, OrderAddRequest, OrderAddResponse, OrderCancelRequest, OrderInfo,
    OrderModifyRequest,
};
pub use public::{OrderBook, ServerInfo, ServerTime};
pub use traits::OrderBookClient;
pub use transport::{ApiRequest, ResponseBody, classify_response};
