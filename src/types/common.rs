//! Common domain types for the obsrv API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Whether this is the buy side, as the `is_buy` request flag.
    pub fn is_buy(self) -> bool {
        matches!(self, Side::Buy)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Order book implementation backing a market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    /// Plain order book
    #[default]
    Simple,
    /// Depth-tracking order book
    Depth,
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookType::Simple => write!(f, "simple"),
            BookType::Depth => write!(f, "depth"),
        }
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(BookType::Simple),
            "depth" => Ok(BookType::Depth),
            other => Err(format!("unknown book type '{other}' (expected simple or depth)")),
        }
    }
}

/// Level of detail returned by the order book endpoint.
///
/// The server accepts 1 (best bid/ask), 2 (aggregated by price) and
/// 3 (every resting order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub struct BookDepth(u8);

impl BookDepth {
    /// Best bid and best ask only.
    pub const TOP: BookDepth = BookDepth(1);
    /// Price levels aggregated across orders.
    pub const AGGREGATED: BookDepth = BookDepth(2);
    /// Every resting order.
    pub const FULL: BookDepth = BookDepth(3);

    /// Create a depth, rejecting values outside 1..=3.
    pub fn new(depth: u8) -> Option<Self> {
        (1..=3).contains(&depth).then_some(BookDepth(depth))
    }

    /// The numeric depth level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for BookDepth {
    fn default() -> Self {
        BookDepth::TOP
    }
}

impl From<BookDepth> for u8 {
    fn from(depth: BookDepth) -> Self {
        depth.0
    }
}

impl std::fmt::Display for BookDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One price level of an order book side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price
    pub price: i64,
    /// Open quantity at this price
    pub qty: i64,
}
