//! Types for public REST API endpoints.

use serde::{Deserialize, Serialize};

use crate::types::PriceLevel;

/// Server metadata returned by `/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server program name.
    pub name: String,
    /// API version number.
    pub apiversion: i64,
    /// Current server time.
    pub time: ServerTime,
}

/// Server clock reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp.
    pub unixtime: i64,
    /// ISO-8601 formatted time string.
    pub iso: String,
}

/// Order book snapshot for one market.
///
/// At depth 1 each side holds only the best level; at depth 2 levels are
/// aggregated by price; at depth 3 there is one entry per resting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Bid levels.
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    /// Ask levels.
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    /// Highest bid, if any.
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.iter().max_by_key(|level| level.price)
    }

    /// Lowest ask, if any.
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.iter().min_by_key(|level| level.price)
    }
}
