//! Single authenticated GET per call.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use super::auth::{Credentials, SignedRequest};
use super::config::ClientConfig;
use super::decode;
use super::document::Document;
use crate::core::Nip24Error;

/// Client version reported in the User-Agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `[app ]NIP24Client/<version> Rust/<rust-version>`.
pub fn user_agent(app: Option<&str>) -> String {
    let client = format!("NIP24Client/{VERSION} Rust/{}", env!("CARGO_PKG_RUST_VERSION"));
    match app {
        Some(app) if !app.is_empty() => format!("{app} {client}"),
        _ => client,
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    user_agent: String,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, Nip24Error> {
        Url::parse(&config.base_url)
            .map_err(|e| Nip24Error::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Nip24Error::Config(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
            user_agent: user_agent(config.app.as_deref()),
        })
    }

    /// Absolute URL of a resource path relative to the base URL.
    pub(crate) fn url_for(&self, path: &str) -> Result<Url, Nip24Error> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| Nip24Error::Config(format!("invalid request URL '{raw}': {e}")))
    }

    /// Sign and send `GET path`, returning the parsed body.
    ///
    /// Bodies of non-success responses are returned only when they hold a
    /// registry error code; anything else is a transport error.
    pub(crate) async fn get(&self, path: &str) -> Result<Document, Nip24Error> {
        let url = self.url_for(path)?;
        let signed = SignedRequest::sign("GET", &url, &self.credentials)?;

        debug!(path = %signed.path, host = %signed.host, "sending registry request");

        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(AUTHORIZATION, signed.authorization())
            .send()
            .await
            .map_err(|e| {
                warn!(path = %signed.path, error = %e, "registry request failed");
                Nip24Error::Transport(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            warn!(path = %signed.path, error = %e, "reading registry response failed");
            Nip24Error::Transport(e.to_string())
        })?;

        let doc = match Document::parse(&body) {
            Ok(doc) => doc,
            Err(_) if !status.is_success() => {
                warn!(path = %signed.path, %status, "registry returned non-XML error response");
                return Err(Nip24Error::Transport(format!("HTTP {status}")));
            }
            Err(e) => return Err(e),
        };

        if !status.is_success() && decode::registry_error(&doc).is_none() {
            warn!(path = %signed.path, %status, "registry returned error response without error code");
            return Err(Nip24Error::Transport(format!("HTTP {status}")));
        }
        Ok(doc)
    }
}
