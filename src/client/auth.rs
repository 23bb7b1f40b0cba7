//! MAC request signing.
//!
//! Each request is signed with HMAC-SHA256 over a newline-separated string of
//! timestamp, nonce, method, path, host and port, followed by an empty
//! extension line. The digest travels base64-encoded in the `Authorization`
//! header:
//!
//! ```text
//! MAC id="<key id>", ts="<unix seconds>", nonce="<hex>", mac="<base64>"
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use url::Url;

use crate::core::Nip24Error;

type HmacSha256 = Hmac<Sha256>;

/// Key identifier of the public sandbox account.
pub const TEST_ID: &str = "test_id";
/// Shared secret of the public sandbox account.
pub const TEST_KEY: &str = "test_key";

/// Random bytes per nonce.
const NONCE_LEN: usize = 4;

/// API key pair. The secret is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret: secret.into(),
        }
    }

    /// Sandbox key pair.
    pub fn test() -> Self {
        Self::new(TEST_ID, TEST_KEY)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn is_test(&self) -> bool {
        self.key_id == TEST_ID && self.secret == TEST_KEY
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::test()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Signature of a single request. Never reused: each call signs afresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub key_id: String,
    pub timestamp: i64,
    pub nonce: String,
    pub method: String,
    pub path: String,
    pub host: String,
    pub port: u16,
    /// Base64 HMAC-SHA256 digest.
    pub mac: String,
}

impl SignedRequest {
    /// Sign `method url` now, with a fresh nonce from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`Nip24Error::Config`] if `url` has no host.
    pub fn sign(method: &str, url: &Url, credentials: &Credentials) -> Result<Self, Nip24Error> {
        Self::sign_with(method, url, credentials, Utc::now().timestamp(), new_nonce())
    }

    /// Sign with an explicit timestamp and nonce.
    pub fn sign_with(
        method: &str,
        url: &Url,
        credentials: &Credentials,
        timestamp: i64,
        nonce: String,
    ) -> Result<Self, Nip24Error> {
        let host = url
            .host_str()
            .ok_or_else(|| Nip24Error::Config(format!("URL has no host: {url}")))?
            .to_string();
        let port = url
            .port()
            .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });
        let path = match url.query() {
            Some(q) => format!("{}?{q}", url.path()),
            None => url.path().to_string(),
        };

        let canonical = canonical_string(timestamp, &nonce, method, &path, &host, port);
        let mut hmac = HmacSha256::new_from_slice(credentials.secret.as_bytes())
            .map_err(|e| Nip24Error::Config(format!("invalid HMAC key: {e}")))?;
        hmac.update(canonical.as_bytes());
        let mac = STANDARD.encode(hmac.finalize().into_bytes());

        Ok(Self {
            key_id: credentials.key_id.clone(),
            timestamp,
            nonce,
            method: method.to_string(),
            path,
            host,
            port,
            mac,
        })
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!(
            r#"MAC id="{}", ts="{}", nonce="{}", mac="{}""#,
            self.key_id, self.timestamp, self.nonce, self.mac
        )
    }
}

/// The string covered by the MAC. The final empty line is the (unused)
/// extension field and must be present.
pub fn canonical_string(
    timestamp: i64,
    nonce: &str,
    method: &str,
    path: &str,
    host: &str,
    port: u16,
) -> String {
    format!("{timestamp}\n{nonce}\n{method}\n{path}\n{host}\n{port}\n\n")
}

fn new_nonce() -> String {
    let mut buf = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
