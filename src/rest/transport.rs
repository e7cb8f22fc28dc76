//! Request descriptors and response classification.
//!
//! An [`ApiRequest`] describes exactly one exchange with the server. The
//! client signs it, sends it, accumulates the whole response body and then
//! maps the status code to an outcome:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200    | `Ok(Some(body))`, JSON-parsed when the request is in JSON mode |
//! | 404    | `Ok(None)`, body ignored |
//! | other  | `Err(ObsrvError::Status { .. })` |

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::error::ObsrvError;

/// Description of a single HTTP request to the obsrv server.
///
/// The target host comes from the client configuration; everything else is
/// per call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path, e.g. `/orderAdd`.
    pub path: String,
    /// Extra path segments appended (percent-encoded) after `path`.
    pub segments: Vec<String>,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Additional request headers.
    pub headers: HeaderMap,
    /// Request body, sent as-is.
    pub body: Option<Vec<u8>>,
    /// Whether the request must carry an `Authorization` header.
    pub requires_auth: bool,
    /// Send `Content-Type: application/json` and parse the response as JSON.
    pub json: bool,
    /// Return the response body as raw bytes instead of text.
    pub binary: bool,
}

impl ApiRequest {
    /// Create a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            requires_auth: false,
            json: false,
            binary: false,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append a path segment, e.g. an order id.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Add a query string parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a request header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a raw request body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `payload` as the JSON request body and enable JSON mode.
    pub fn json_body<P: Serialize + ?Sized>(mut self, payload: &P) -> Result<Self, ObsrvError> {
        self.body = Some(serde_json::to_vec(payload)?);
        self.json = true;
        Ok(self)
    }

    /// Enable or disable JSON mode.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Enable or disable binary response mode.
    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Mark the request as requiring authentication.
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// A successfully received response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON (JSON mode).
    Json(serde_json::Value),
    /// Body decoded as UTF-8 text.
    Text(String),
    /// Raw body bytes (binary mode).
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Consume the body, returning the JSON value if there is one.
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the body as text, if it was decoded as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Map a fully received response to its outcome.
///
/// Exactly one of error and value is produced; `Ok(None)` is the 404
/// "absent resource" result.
pub fn classify_response(
    status: StatusCode,
    body: &[u8],
    json: bool,
    binary: bool,
) -> Result<Option<ResponseBody>, ObsrvError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status != StatusCode::OK {
        return Err(ObsrvError::from_status(status));
    }

    let body = if json {
        ResponseBody::Json(serde_json::from_slice(body)?)
    } else if binary {
        ResponseBody::Binary(body.to_vec())
    } else {
        ResponseBody::Text(String::from_utf8_lossy(body).into_owned())
    };
    Ok(Some(body))
}

/// Read the whole response body and classify it.
pub(crate) async fn read_response(
    response: reqwest::Response,
    json: bool,
    binary: bool,
) -> Result<Option<ResponseBody>, ObsrvError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status != StatusCode::OK && status != StatusCode::NOT_FOUND {
        tracing::warn!(status = status.as_u16(), "unexpected HTTP status from server");
    }
    classify_response(status, &body, json, binary)
}
