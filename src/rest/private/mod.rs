//! Private REST API endpoints (authentication required).
//!
//! These endpoints require credentials to be configured on the client;
//! without them every call fails with [`ObsrvError::MissingCredentials`]
//! before anything is sent.

mod types;

pub use types::*;

use crate::error::ObsrvError;
use crate::rest::ObsrvClient;
use crate::rest::endpoints::private;
use crate::rest::transport::ApiRequest;

impl ObsrvClient {
    /// Create a new market.
    ///
    /// Returns `Some(true)` once the market exists. A duplicate symbol is
    /// rejected by the server with `406 Not Acceptable`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use obsrv_client::auth::StaticCredentials;
    /// use obsrv_client::rest::{MarketAddRequest, ObsrvClient};
    /// use obsrv_client::types::BookType;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("testuser", "testpass"));
    ///     let client = ObsrvClient::builder().credentials(credentials).build()?;
    ///
    ///     let request = MarketAddRequest::new("GOOG").book_type(BookType::Depth);
    ///     client.market_add(&request).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn market_add(&self, request: &MarketAddRequest) -> Result<Option<bool>, ObsrvError> {
        self.private_post(private::MARKET_ADD, request).await
    }

    /// Submit a new order.
    ///
    /// Returns `Ok(None)` when the market does not exist.
    pub async fn order_add(
        &self,
        request: &OrderAddRequest,
    ) -> Result<Option<OrderAddResponse>, ObsrvError> {
        self.private_post(private::ORDER_ADD, request).await
    }

    /// Cancel an order.
    pub async fn order_cancel(
        &self,
        request: &OrderCancelRequest,
    ) -> Result<Option<bool>, ObsrvError> {
        self.private_post(private::ORDER_CANCEL, request).await
    }

    /// Change an order's price and/or quantity.
    pub async fn order_modify(
        &self,
        request: &OrderModifyRequest,
    ) -> Result<Option<bool>, ObsrvError> {
        self.private_post(private::ORDER_MODIFY, request).await
    }

    /// Get details of a single order.
    ///
    /// Returns `Ok(None)` when no such order exists.
    pub async fn order_info(&self, order_id: &str) -> Result<Option<OrderInfo>, ObsrvError> {
        let request = ApiRequest::get(private::ORDER)
            .segment(order_id)
            .authenticated();
        self.fetch(request).await
    }
}
