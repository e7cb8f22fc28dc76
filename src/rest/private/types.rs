//! Types for private REST API endpoints.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::types::{BookType, Side};

/// Request to create a new market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketAddRequest {
    /// Market symbol: 1 to 16 uppercase letters.
    pub symbol: String,
    /// Order book implementation, normally "simple" or "depth". Validated by
    /// the server.
    pub booktype: String,
}

impl MarketAddRequest {
    /// Create a request for a market with a simple order book.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            booktype: BookType::Simple.to_string(),
        }
    }

    /// Set the order book type.
    pub fn book_type(mut self, booktype: BookType) -> Self {
        self.booktype = booktype.to_string();
        self
    }

    /// Set the order book type by name, without checking it.
    pub fn book_type_name(mut self, booktype: impl Into<String>) -> Self {
        self.booktype = booktype.into();
        self
    }

    /// The order book type, if it is one this client knows.
    pub fn known_book_type(&self) -> Option<BookType> {
        self.booktype.parse().ok()
    }

    /// Whether the symbol is acceptable to the server.
    pub fn has_valid_symbol(&self) -> bool {
        (1..=16).contains(&self.symbol.len())
            && self.symbol.bytes().all(|b| b.is_ascii_uppercase())
    }
}

/// Request to submit a new order.
///
/// Fields the client does not model are kept in `extra` and sent along
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderAddRequest {
    /// Market symbol.
    pub symbol: String,
    /// True for a buy order, false for a sell order.
    pub is_buy: bool,
    /// Limit price; 0 for a market order.
    pub price: i64,
    /// Order quantity.
    pub qty: i64,
    /// All-or-none condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aon: Option<bool>,
    /// Immediate-or-cancel condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ioc: Option<bool>,
    /// Stop price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<i64>,
    /// Additional fields passed through to the server.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

const ORDER_ADD_FIELDS: [&str; 7] = ["symbol", "is_buy", "price", "qty", "aon", "ioc", "stop"];

impl Serialize for OrderAddRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("symbol", &self.symbol)?;
        map.serialize_entry("is_buy", &self.is_buy)?;
        map.serialize_entry("price", &self.price)?;
        map.serialize_entry("qty", &self.qty)?;
        if let Some(aon) = self.aon {
            map.serialize_entry("aon", &aon)?;
        }
        if let Some(ioc) = self.ioc {
            map.serialize_entry("ioc", &ioc)?;
        }
        if let Some(stop) = self.stop {
            map.serialize_entry("stop", &stop)?;
        }
        for (key, value) in &self.extra {
            if !ORDER_ADD_FIELDS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl OrderAddRequest {
    /// Create a limit order.
    pub fn limit(symbol: impl Into<String>, side: Side, price: i64, qty: i64) -> Self {
        Self {
            symbol: symbol.into(),
            is_buy: side.is_buy(),
            price,
            qty,
            aon: None,
            ioc: None,
            stop: None,
            extra: Map::new(),
        }
    }

    /// Build an order from a JSON object, keeping unknown fields in `extra`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let mut order: Self = serde_json::from_value(value.clone())?;
        if let Value::Object(mut fields) = value {
            fields.retain(|key, _| !ORDER_ADD_FIELDS.contains(&key.as_str()));
            order.extra = fields;
        }
        Ok(order)
    }

    /// Create a market order.
    pub fn market(symbol: impl Into<String>, side: Side, qty: i64) -> Self {
        Self::limit(symbol, side, 0, qty)
    }

    /// Require the order to fill completely or not at all.
    pub fn all_or_none(mut self) -> Self {
        self.aon = Some(true);
        self
    }

    /// Cancel any part of the order that cannot fill immediately.
    pub fn immediate_or_cancel(mut self) -> Self {
        self.ioc = Some(true);
        self
    }

    /// Set a stop price.
    pub fn stop_price(mut self, stop: i64) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Order side.
    pub fn side(&self) -> Side {
        if self.is_buy { Side::Buy } else { Side::Sell }
    }
}

/// Response to an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAddResponse {
    /// Server-assigned order id.
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Request to cancel an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelRequest {
    /// Order id.
    pub oid: String,
}

impl OrderCancelRequest {
    /// Create a cancel request.
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }
}

/// Request to change an order's price and/or quantity.
///
/// The server rejects a request that changes neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModifyRequest {
    /// Order id.
    pub oid: String,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// Signed change to the order quantity.
    #[serde(
        rename = "qtyDelta",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_delta: Option<i64>,
}

impl OrderModifyRequest {
    /// Change both price and quantity.
    pub fn new(oid: impl Into<String>, price: i64, qty_delta: i64) -> Self {
        Self {
            oid: oid.into(),
            price: Some(price),
            qty_delta: Some(qty_delta),
        }
    }

    /// Change only the price.
    pub fn price_only(oid: impl Into<String>, price: i64) -> Self {
        Self {
            oid: oid.into(),
            price: Some(price),
            qty_delta: None,
        }
    }

    /// Change only the quantity.
    pub fn qty_only(oid: impl Into<String>, qty_delta: i64) -> Self {
        Self {
            oid: oid.into(),
            price: None,
            qty_delta: Some(qty_delta),
        }
    }
}

/// Details of a single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    /// Order id.
    pub id: String,
    /// Order side.
    pub side: Side,
    /// Order quantity.
    pub qty: u64,
    /// Limit price.
    pub price: u64,
    /// All-or-none condition.
    pub aon: bool,
    /// Immediate-or-cancel condition.
    pub ioc: bool,
    /// Submission time as fractional Unix seconds.
    pub submitted_at: serde_json::Number,
    /// Stop price, for stop orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<u64>,
    /// Order type: "limit", "market", "limit-stop" or "market-stop".
    #[serde(rename = "type")]
    pub order_type: String,
}

impl OrderInfo {
    /// Whether this is a stop order.
    pub fn is_stop(&self) -> bool {
        self.order_type.ends_with("-stop")
    }
}
