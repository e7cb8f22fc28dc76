//! obsrv REST API endpoint paths.

/// Public endpoints (no authentication required).
pub mod public {
    /// Server metadata.
    pub const INFO: &str = "/info";
    /// List of market symbols.
    pub const MARKET_LIST: &str = "/marketList";
    /// Order book for a symbol (`/book/<symbol>`).
    pub const BOOK: &str = "/book";
}

/// Private endpoints (authentication required).
pub mod private {
    /// Create a new market.
    pub const MARKET_ADD: &str = "/marketAdd";
    /// Submit an order.
    pub const ORDER_ADD: &str = "/orderAdd";
    /// Cancel an order.
    pub const ORDER_CANCEL: &str = "/orderCancel";
    /// Modify an order's price or quantity.
    pub const ORDER_MODIFY: &str = "/orderModify";
    /// Single order details (`/order/<orderId>`).
    pub const ORDER: &str = "/order";
}
