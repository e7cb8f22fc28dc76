//! Client configuration.
//!
//! A [`ClientConfig`] is assembled once (directly, from the environment, or
//! through [`ObsrvClientBuilder`](crate::rest::ObsrvClientBuilder)) and is
//! immutable after the client is built.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{CredentialsProvider, EnvCredentials};
use crate::error::ObsrvError;

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default server port.
pub const DEFAULT_PORT: u16 = 7979;

const HOST_VAR: &str = "OBSRV_HOST";
const PORT_VAR: &str = "OBSRV_PORT";
const TIMEOUT_VAR: &str = "OBSRV_TIMEOUT";

/// Connection and authentication settings for an [`ObsrvClient`](crate::rest::ObsrvClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Server host, without port. Also sent verbatim as the `Host` header.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Credentials for authenticated endpoints.
    pub credentials: Option<Arc<dyn CredentialsProvider>>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Custom `User-Agent` header.
    pub user_agent: Option<String>,
    /// Retries for transient failures. Zero disables retrying.
    pub max_retries: u32,
}

impl ClientConfig {
    /// Create a configuration for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Build a configuration from `OBSRV_*` environment variables.
    ///
    /// Reads `OBSRV_HOST`, `OBSRV_PORT`, `OBSRV_TIMEOUT` (seconds) and, when
    /// both are set, `OBSRV_USERNAME` / `OBSRV_SECRET`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ObsrvError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var(HOST_VAR) {
            config.host = host;
        }
        if let Ok(port) = std::env::var(PORT_VAR) {
            config.port = port
                .parse()
                .map_err(|_| ObsrvError::Config(format!("{PORT_VAR} is not a valid port: {port}")))?;
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_VAR) {
            let secs: u64 = timeout.parse().map_err(|_| {
                ObsrvError::Config(format!("{TIMEOUT_VAR} is not a number of seconds: {timeout}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(credentials) = EnvCredentials::try_from_env() {
            config.credentials = Some(Arc::new(credentials));
        }

        Ok(config)
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:7979/`.
    pub fn base_url(&self) -> Result<url::Url, ObsrvError> {
        if self.host.is_empty() {
            return Err(ObsrvError::Config("host must not be empty".to_string()));
        }
        let url = url::Url::parse(&format!("http://{}:{}/", self.host, self.port))?;
        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            credentials: None,
            timeout: None,
            user_agent: None,
            max_retries: 0,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "username",
                &self.credentials.as_ref().map(|c| c.get_credentials().username.as_str()),
            )
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
