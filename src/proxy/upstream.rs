//! Upstream client.
//!
//! Fetches published artifacts from the static server over plain GET.

use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::core::config::ProxyConfig;
use crate::error::{ProxyError, Result};

/// Shared, immutable handle on the static server.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client,
    base: String,
}

impl Upstream {
    /// Build a client for `config.target` with the configured deadline.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("pass-proxy/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProxyError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: config.target.clone(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// GET `<base><location>` and return the body as text.
    ///
    /// # Errors
    ///
    /// - `Request` if the URL is invalid or the request cannot be sent
    /// - `Upstream` if the server answers with a status of 400 or more
    /// - `BadGateway` for any other status than 200
    /// - `Transport` on timeout or if the body cannot be read
    pub async fn fetch(&self, location: &str) -> std::result::Result<String, ProxyError> {
        let url = format!("{}{}", self.base, location);
        let url = Url::parse(&url).map_err(|e| ProxyError::Request(format!("{}: {}", url, e)))?;
        debug!(url = %url, "fetching upstream");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProxyError::Transport(e.to_string())
            } else {
                ProxyError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(ProxyError::BadGateway(status.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;
        debug!(bytes = body.len(), "upstream body read");

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
