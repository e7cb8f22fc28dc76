//! `cscpp1-sha256` request signing for obsrv API authentication.
//!
//! Authenticated endpoints require a signature computed as:
//! ```text
//! HMAC-SHA256(secret, "cscpp1-sha256\n" + username + "\n" + Host + "\n"
//!                     + X-Unixtime + "\n" + ETag + "\n")
//! ```
//!
//! where `ETag` is the lowercase hex SHA-256 of the request body. The
//! signature is hex-encoded and sent as
//! `Authorization: cscpp1-sha256 <username> <signature>`.

use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, ETAG, HOST, HeaderMap, HeaderName, HeaderValue};
use sha2::{Digest, Sha256};

use crate::auth::Credentials;
use crate::error::ObsrvError;

type HmacSha256 = Hmac<Sha256>;

/// Identifier of the signing scheme, first field of the canonical string.
pub const AUTH_SCHEME: &str = "cscpp1-sha256";

/// Header carrying the request timestamp in Unix seconds.
pub const X_UNIXTIME: HeaderName = HeaderName::from_static("x-unixtime");

/// Compute the body digest sent in the `ETag` header.
///
/// Returns the SHA-256 of the exact body bytes as lowercase hex.
pub fn body_digest(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Build the canonical string that is fed to the HMAC.
///
/// A request without a body has no `ETag`; its digest slot is empty.
///
/// # Example
///
/// ```rust
/// use obsrv_client::auth::canonical_string;
///
/// let canonical = canonical_string("testuser", "127.0.0.1", 1700000000, None);
/// assert_eq!(canonical, "cscpp1-sha256\ntestuser\n127.0.0.1\n1700000000\n\n");
/// ```
pub fn canonical_string(username: &str, host: &str, unixtime: i64, digest: Option<&str>) -> String {
    let unixtime = unixtime.to_string();
    let fields = [AUTH_SCHEME, username, host, &unixtime, digest.unwrap_or("")];

    let mut canonical = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
    for field in fields {
        canonical.push_str(field);
        canonical.push('\n');
    }
    canonical
}

/// Compute the lowercase hex HMAC-SHA256 of a canonical string.
pub fn sign_canonical(secret: &str, canonical: &str) -> Result<String, ObsrvError> {
    let mut hmac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ObsrvError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(canonical.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

/// Build the full `Authorization` header value for a request.
///
/// # Example
///
/// ```rust
/// use obsrv_client::auth::{Credentials, authorization_header};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("testuser", "testpass");
/// let value = authorization_header(&credentials, "127.0.0.1", 1700000000, None)?;
/// assert!(value.starts_with("cscpp1-sha256 testuser "));
/// # Ok(())
/// # }
/// ```
pub fn authorization_header(
    credentials: &Credentials,
    host: &str,
    unixtime: i64,
    digest: Option<&str>,
) -> Result<String, ObsrvError> {
    let canonical = canonical_string(&credentials.username, host, unixtime, digest);
    let signature = sign_canonical(credentials.expose_secret(), &canonical)?;
    Ok(format!("{AUTH_SCHEME} {} {signature}", credentials.username))
}

/// Headers produced by the signer for one outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningHeaders {
    /// `Host` value: the bare host, without port.
    pub host: String,
    /// `X-Unixtime` value.
    pub unixtime: i64,
    /// `ETag` value, present only when the request has a body.
    pub etag: Option<String>,
    /// `Authorization` value, present only for authenticated requests.
    pub authorization: Option<String>,
}

impl SigningHeaders {
    /// Insert these headers into a header map, replacing existing values.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<(), ObsrvError> {
        headers.insert(HOST, HeaderValue::from_str(&self.host)?);
        headers.insert(X_UNIXTIME, HeaderValue::from(self.unixtime));
        if let Some(etag) = &self.etag {
            headers.insert(ETAG, HeaderValue::from_str(etag)?);
        }
        if let Some(authorization) = &self.authorization {
            let mut value = HeaderValue::from_str(authorization)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

/// Compute the signing headers for a request.
///
/// Pass `credentials` only for requests that require authentication; without
/// them no `Authorization` header is produced.
pub fn signing_headers(
    host: &str,
    body: Option<&[u8]>,
    unixtime: i64,
    credentials: Option<&Credentials>,
) -> Result<SigningHeaders, ObsrvError> {
    let etag = body.map(body_digest);
    let authorization = credentials
        .map(|creds| authorization_header(creds, host, unixtime, etag.as_deref()))
        .transpose()?;

    Ok(SigningHeaders {
        host: host.to_string(),
        unixtime,
        etag,
        authorization,
    })
}
