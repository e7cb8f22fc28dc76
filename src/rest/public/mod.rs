//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::ObsrvError;
use crate::rest::ObsrvClient;
use crate::rest::endpoints::public;
use crate::rest::transport::ApiRequest;
use crate::types::BookDepth;

impl ObsrvClient {
    /// Get server metadata.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use obsrv_client::rest::ObsrvClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ObsrvClient::builder().build()?;
    ///     if let Some(info) = client.info().await? {
    ///         println!("{} v{} at {}", info.name, info.apiversion, info.time.iso);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn info(&self) -> Result<Option<ServerInfo>, ObsrvError> {
        self.public_get(public::INFO).await
    }

    /// List the symbols of all markets.
    pub async fn market_list(&self) -> Result<Option<Vec<String>>, ObsrvError> {
        self.public_get(public::MARKET_LIST).await
    }

    /// Get the order book for a market.
    ///
    /// Returns `Ok(None)` when the market does not exist.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Market symbol, e.g. "GOOG".
    /// * `depth` - Level of detail.
    pub async fn book(
        &self,
        symbol: &str,
        depth: BookDepth,
    ) -> Result<Option<OrderBook>, ObsrvError> {
        let request = ApiRequest::get(public::BOOK)
            .segment(symbol)
            .query("depth", depth);
        self.fetch(request).await
    }
}
