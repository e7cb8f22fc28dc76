//! obsrv REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::auth::{CredentialsProvider, SystemClock, UnixClock, signing_headers};
use crate::config::ClientConfig;
use crate::error::ObsrvError;
use crate::rest::transport::{ApiRequest, ResponseBody, read_response};

/// The obsrv REST API client.
///
/// Every request is stamped with `Host` and `X-Unixtime` headers; requests
/// to authenticated endpoints are additionally signed with the configured
/// credentials.
///
/// # Example
///
/// ```rust,no_run
/// use obsrv_client::rest::ObsrvClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ObsrvClient::builder().build()?;
///     let info = client.info().await?;
///     println!("Server info: {:?}", info);
///     Ok(())
/// }
/// ```
///
/// For authenticated endpoints, provide credentials:
///
/// ```rust,no_run
/// use obsrv_client::auth::StaticCredentials;
/// use obsrv_client::rest::{MarketAddRequest, ObsrvClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("testuser", "testpass"));
///     let client = ObsrvClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let created = client.market_add(&MarketAddRequest::new("GOOG")).await?;
///     println!("Created: {:?}", created);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ObsrvClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    host: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Arc<dyn UnixClock>,
}

impl ObsrvClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ObsrvError> {
        Self::builder().config(config).build()
    }

    /// Create a new client builder.
    pub fn builder() -> ObsrvClientBuilder {
        ObsrvClientBuilder::new()
    }

    /// The host this client talks to, as sent in the `Host` header.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform one request/response exchange.
    ///
    /// Returns `Ok(None)` when the server answers 404, the body on 200, and
    /// an error for any other status or for connection and parse failures.
    pub async fn call(&self, request: ApiRequest) -> Result<Option<ResponseBody>, ObsrvError> {
        let ApiRequest {
            method,
            path,
            segments,
            query,
            mut headers,
            body,
            requires_auth,
            json,
            binary,
        } = request;

        let credentials = if requires_auth {
            let provider = self
                .credentials
                .as_ref()
                .ok_or(ObsrvError::MissingCredentials)?;
            Some(provider.get_credentials())
        } else {
            None
        };

        let signed = signing_headers(
            &self.host,
            body.as_deref(),
            self.clock.unix_time(),
            credentials,
        )?;
        signed.apply(&mut headers)?;

        if let Some(body) = &body {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        }
        if json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let url = self.endpoint_url(&path, &segments, &query)?;
        tracing::debug!(%method, %url, authenticated = requires_auth, "sending request");

        let mut builder = self.http_client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;

        read_response(response, json, binary).await
    }

    /// Perform a JSON request and decode the response into `T`.
    pub(crate) async fn fetch<T>(&self, request: ApiRequest) -> Result<Option<T>, ObsrvError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.call(request.json(true)).await? {
            None => Ok(None),
            Some(ResponseBody::Json(value)) => Ok(Some(serde_json::from_value(value)?)),
            Some(_) => Err(ObsrvError::InvalidResponse(
                "expected a JSON response body".to_string(),
            )),
        }
    }

    /// Make an unauthenticated GET request.
    pub(crate) async fn public_get<T>(&self, endpoint: &str) -> Result<Option<T>, ObsrvError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.fetch(ApiRequest::get(endpoint)).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub(crate) async fn private_post<T, P>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<Option<T>, ObsrvError>
    where
        T: serde::de::DeserializeOwned,
        P: serde::Serialize,
    {
        let request = ApiRequest::post(endpoint).json_body(params)?.authenticated();
        self.fetch(request).await
    }

    fn endpoint_url(
        &self,
        path: &str,
        segments: &[String],
        query: &[(String, String)],
    ) -> Result<Url, ObsrvError> {
        let mut url = self.base_url.join(path)?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ObsrvError::Config("base URL cannot have path segments".to_string()))?
                .pop_if_empty()
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

impl std::fmt::Debug for ObsrvClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsrvClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`ObsrvClient`].
pub struct ObsrvClientBuilder {
    config: ClientConfig,
    clock: Option<Arc<dyn UnixClock>>,
}

impl ObsrvClientBuilder {
    /// Create a new builder with default settings (`127.0.0.1:7979`, no credentials).
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            clock: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the server host (without port).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set host and port from a base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: &str) -> Result<Self, ObsrvError> {
        let url = Url::parse(url)?;
        self.config.host = url
            .host_str()
            .ok_or_else(|| ObsrvError::Config(format!("URL has no host: {url}")))?
            .to_string();
        self.config.port = url
            .port_or_known_default()
            .ok_or_else(|| ObsrvError::Config(format!("URL has no port: {url}")))?;
        Ok(self)
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// Set a custom clock for the `X-Unixtime` header.
    pub fn clock(mut self, clock: Arc<dyn UnixClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries for transient failures (default 0).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ObsrvClient, ObsrvError> {
        let config = self.config;
        let base_url = config.base_url()?;

        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("obsrv-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("obsrv-client"));
        headers.insert(USER_AGENT, header_value);

        // Build the HTTP client with middleware.
        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        Ok(ObsrvClient {
            http_client: client,
            base_url,
            host: config.host,
            credentials: config.credentials,
            clock,
        })
    }
}

impl Default for ObsrvClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(host: &str, port: u16) -> ObsrvClient {
        ObsrvClient::builder().host(host).port(port).build().unwrap()
    }

    #[test]
    fn test_default_client() {
        let client = ObsrvClient::builder().build().unwrap();
        assert_eq!(client.host(), "127.0.0.1");
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:7979/");
    }

    #[test]
    fn test_base_url_sets_host_and_port() {
        let client = ObsrvClient::builder()
            .base_url("http://localhost:4545")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.host(), "localhost");
        assert_eq!(client.base_url().port(), Some(4545));
    }

    #[test]
    fn test_endpoint_url_segments_and_query() {
        let client = client_for("127.0.0.1", 7979);
        let url = client
            .endpoint_url(
                "/book",
                &["GOOG".to_string()],
                &[("depth".to_string(), "2".to_string())],
            )
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:7979/book/GOOG?depth=2");
    }

    #[test]
    fn test_endpoint_url_escapes_segments() {
        let client = client_for("127.0.0.1", 7979);
        let url = client
            .endpoint_url("/order", &["a/b?c".to_string()], &[])
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:7979/order/a%2Fb%3Fc");
    }

    #[tokio::test]
    async fn test_authenticated_call_without_credentials() {
        let client = client_for("127.0.0.1", 7979);
        let request = ApiRequest::get("/order").segment("abc").authenticated();
        let result = client.call(request).await;
        assert!(matches!(result, Err(ObsrvError::MissingCredentials)));
    }

    #[test]
    fn test_debug_output() {
        let client = client_for("127.0.0.1", 7979);
        let debug_str = format!("{client:?}");
        assert!(debug_str.contains("http://127.0.0.1:7979/"));
        assert!(debug_str.contains("has_credentials: false"));
    }
}
