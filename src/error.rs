//! Error types for the obsrv client library.

use reqwest_retry::RetryError;
use thiserror::Error;

/// The main error type for all obsrv client operations.
#[derive(Error, Debug)]
pub enum ObsrvError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The server answered with a status other than 200 or 404
    #[error("HTTP status {code}: {message}")]
    Status {
        /// Numeric HTTP status code
        code: u16,
        /// Canonical reason phrase for the status
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// A header value could not be encoded
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Missing required credentials
    #[error("Missing credentials: username and secret required for authenticated endpoints")]
    MissingCredentials,
}

impl ObsrvError {
    /// Build a status error from a non-200/404 response status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            code: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// The HTTP status code, if this error came from a server response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if this is a network-level failure (no usable response).
    pub fn is_connection(&self) -> bool {
        self.reqwest_error()
            .is_some_and(|e| e.is_connect() || e.is_timeout() || e.is_request())
    }

    /// Check if the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.reqwest_error().is_some_and(reqwest::Error::is_timeout)
    }

    /// The underlying reqwest error, looking through middleware wrappers.
    fn reqwest_error(&self) -> Option<&reqwest::Error> {
        match self {
            Self::Http(e) => Some(e),
            Self::HttpMiddleware(e) => middleware_reqwest_error(e),
            _ => None,
        }
    }

    /// Check if the response body could not be parsed.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// Find the reqwest error inside a middleware error.
///
/// The retry layer wraps failures in a transparent [`RetryError`], so the
/// inner reqwest error never shows up in the plain source chain.
fn middleware_reqwest_error(error: &reqwest_middleware::Error) -> Option<&reqwest::Error> {
    match error {
        reqwest_middleware::Error::Reqwest(e) => Some(e),
        reqwest_middleware::Error::Middleware(e) => e.chain().find_map(|cause| {
            if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
                return Some(e);
            }
            if let Some(RetryError::WithRetries { err, .. } | RetryError::Error(err)) =
                cause.downcast_ref::<RetryError>()
            {
                return middleware_reqwest_error(err);
            }
            cause
                .downcast_ref::<reqwest_middleware::Error>()
                .and_then(middleware_reqwest_error)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let error = ObsrvError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "HTTP status 500: Internal Server Error");
        assert_eq!(error.status_code(), Some(500));
        assert!(!error.is_connection());
    }

    #[test]
    fn test_status_error_unknown_reason() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        let error = ObsrvError::from_status(status);
        assert_eq!(error.to_string(), "HTTP status 599: Unknown");
    }

    #[test]
    fn test_json_error_is_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = ObsrvError::from(err);
        assert!(error.is_parse());
        assert_eq!(error.status_code(), None);
    }

    async fn refused_connection() -> reqwest::Error {
        // Nothing listens on port 1.
        reqwest::Client::new()
            .get("http://127.0.0.1:1/info")
            .send()
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_connection_error_through_retry_layer() {
        let inner = reqwest_middleware::Error::Reqwest(refused_connection().await);
        let error = ObsrvError::HttpMiddleware(reqwest_middleware::Error::Middleware(
            RetryError::Error(inner).into(),
        ));

        assert!(error.is_connection());
        assert!(!error.is_timeout());
        assert_eq!(error.status_code(), None);
    }

    #[tokio::test]
    async fn test_connection_error_after_retries() {
        let inner = reqwest_middleware::Error::Reqwest(refused_connection().await);
        let error = ObsrvError::HttpMiddleware(reqwest_middleware::Error::Middleware(
            RetryError::WithRetries {
                retries: 2,
                err: inner,
            }
            .into(),
        ));

        assert!(error.is_connection());
    }

    #[test]
    fn test_unrelated_middleware_error_is_not_connection() {
        let error = ObsrvError::HttpMiddleware(reqwest_middleware::Error::middleware(
            std::io::Error::other("rejected by middleware"),
        ));
        assert!(!error.is_connection());
        assert!(!error.is_timeout());
    }
}
