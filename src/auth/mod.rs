//! Authentication module for the obsrv API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Unix timestamp sources for the `X-Unixtime` header
//! - `cscpp1-sha256` (HMAC-SHA256) request signing

mod clock;
mod credentials;
mod signature;

pub use clock::{FixedClock, SystemClock, UnixClock};
pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use signature::{
    AUTH_SCHEME, SigningHeaders, X_UNIXTIME, authorization_header, body_digest, canonical_string,
    sign_canonical, signing_headers,
};
