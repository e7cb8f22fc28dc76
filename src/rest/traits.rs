//! Trait definition for the obsrv REST API client.
//!
//! This module provides the `OrderBookClient` trait which abstracts all REST
//! API operations, so callers such as the CLI can be driven by a mock in
//! tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use obsrv_client::rest::{ObsrvClient, OrderBookClient};
//!
//! async fn show_markets<C: OrderBookClient>(client: &C) -> Result<(), obsrv_client::ObsrvError> {
//!     let markets = client.market_list().await?.unwrap_or_default();
//!     println!("Markets: {}", markets.join(", "));
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::ObsrvError;
use crate::rest::ObsrvClient;
use crate::rest::private::{
    MarketAddRequest, OrderAddRequest, OrderAddResponse, OrderCancelRequest, OrderInfo,
    OrderModifyRequest,
};
use crate::rest::public::{OrderBook, ServerInfo};
use crate::types::BookDepth;

/// Trait defining all obsrv REST API operations.
///
/// Every method resolves to `Ok(None)` when the server reports the resource
/// as absent (404).
pub trait OrderBookClient: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get server metadata.
    fn info(&self) -> impl Future<Output = Result<Option<ServerInfo>, ObsrvError>> + Send;

    /// List the symbols of all markets.
    fn market_list(&self) -> impl Future<Output = Result<Option<Vec<String>>, ObsrvError>> + Send;

    /// Get the order book for a market.
    fn book(
        &self,
        symbol: &str,
        depth: BookDepth,
    ) -> impl Future<Output = Result<Option<OrderBook>, ObsrvError>> + Send;

    // ========== Private Endpoints ==========

    /// Create a new market.
    fn market_add(
        &self,
        request: &MarketAddRequest,
    ) -> impl Future<Output = Result<Option<bool>, ObsrvError>> + Send;

    /// Submit a new order.
    fn order_add(
        &self,
        request: &OrderAddRequest,
    ) -> impl Future<Output = Result<Option<OrderAddResponse>, ObsrvError>> + Send;

    /// Cancel an order.
    fn order_cancel(
        &self,
        request: &OrderCancelRequest,
    ) -> impl Future<Output = Result<Option<bool>, ObsrvError>> + Send;

    /// Change an order's price and/or quantity.
    fn order_modify(
        &self,
        request: &OrderModifyRequest,
    ) -> impl Future<Output = Result<Option<bool>, ObsrvError>> + Send;

    /// Get details of a single order.
    fn order_info(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<Option<OrderInfo>, ObsrvError>> + Send;
}

impl OrderBookClient for ObsrvClient {
    async fn info(&self) -> Result<Option<ServerInfo>, ObsrvError> {
        ObsrvClient::info(self).await
    }

    async fn market_list(&self) -> Result<Option<Vec<String>>, ObsrvError> {
        ObsrvClient::market_list(self).await
    }

    async fn book(&self, symbol: &str, depth: BookDepth) -> Result<Option<OrderBook>, ObsrvError> {
        ObsrvClient::book(self, symbol, depth).await
    }

    async fn market_add(&self, request: &MarketAddRequest) -> Result<Option<bool>, ObsrvError> {
        ObsrvClient::market_add(self, request).await
    }

    async fn order_add(
        &self,
        request: &OrderAddRequest,
    ) -> Result<Option<OrderAddResponse>, ObsrvError> {
        ObsrvClient::order_add(self, request).await
    }

    async fn order_cancel(&self, request: &OrderCancelRequest) -> Result<Option<bool>, ObsrvError> {
        ObsrvClient::order_cancel(self, request).await
    }

    async fn order_modify(&self, request: &OrderModifyRequest) -> Result<Option<bool>, ObsrvError> {
        ObsrvClient::order_modify(self, request).await
    }

    async fn order_info(&self, order_id: &str) -> Result<Option<OrderInfo>, ObsrvError> {
        ObsrvClient::order_info(self, order_id).await
    }
}
