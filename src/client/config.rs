//! Client configuration.
//!
//! Without credentials the client talks to the public sandbox with the test
//! key pair. Supplying a key pair switches to the production service.

use super::auth::Credentials;
use crate::core::Nip24Error;

/// Production service URL.
pub const PRODUCTION_URL: &str = "https://www.nip24.pl/api";
/// Sandbox service URL.
pub const TEST_URL: &str = "https://www.nip24.pl/api-test";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`Nip24Client`](super::Nip24Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL; resource paths are appended after a `/`.
    pub base_url: String,
    pub credentials: Credentials,
    /// Application identifier prepended to the User-Agent.
    pub app: Option<String>,
    /// Whole-request deadline in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Sandbox service with the test key pair.
    pub fn test() -> Self {
        Self {
            base_url: TEST_URL.to_string(),
            credentials: Credentials::test(),
            app: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Production service with the given key pair.
    pub fn production(key_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            base_url: PRODUCTION_URL.to_string(),
            credentials: Credentials::new(key_id, key),
            ..Self::test()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        let app = app.into();
        self.app = (!app.trim().is_empty()).then_some(app);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NIP24_KEY_ID`, `NIP24_KEY` (both or neither; without them the sandbox is used)
    /// - `NIP24_URL` (overrides the service URL)
    /// - `NIP24_APP` (application identifier)
    /// - `NIP24_TIMEOUT_SECS` (default: 30)
    ///
    /// # Errors
    ///
    /// Returns [`Nip24Error::Config`] when only one half of the key pair is set.
    pub fn from_env() -> Result<Self, Nip24Error> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Nip24Error> {
        let mut config = match (lookup("NIP24_KEY_ID"), lookup("NIP24_KEY")) {
            (Some(id), Some(key)) => Self::production(id, key),
            (None, None) => Self::test(),
            _ => {
                return Err(Nip24Error::Config(
                    "NIP24_KEY_ID and NIP24_KEY must be set together".into(),
                ));
            }
        };
        if let Some(url) = lookup("NIP24_URL") {
            config = config.with_url(url);
        }
        if let Some(app) = lookup("NIP24_APP") {
            config = config.with_app(app);
        }
        if let Some(secs) = lookup("NIP24_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config = config.with_timeout(secs);
        }
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::test()
    }
}
