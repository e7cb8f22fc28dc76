//! Credential management for obsrv API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Default environment variable holding the username.
pub(crate) const USERNAME_VAR: &str = "OBSRV_USERNAME";
/// Default environment variable holding the shared secret.
pub(crate) const SECRET_VAR: &str = "OBSRV_SECRET";

/// API credentials: the username and the secret shared with the server.
#[derive(Clone)]
pub struct Credentials {
    /// The username (sent in clear in the `Authorization` header)
    pub username: String,
    /// The shared secret (HMAC key, never transmitted)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from a username and shared secret.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Get the shared secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, secret),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `OBSRV_USERNAME` and `OBSRV_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if either variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(USERNAME_VAR, SECRET_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if either variable is not set.
    pub fn try_from_env_vars(username_var: &str, secret_var: &str) -> Option<Self> {
        let username = std::env::var(username_var).ok()?;
        let secret = std::env::var(secret_var).ok()?;

        Some(Self {
            credentials: Credentials::new(username, secret),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
