//! HTTP Transport
//!
//! The [`Transport`] seam lets the client run against the real API or an
//! in-process fake.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::error::ApiError;
use crate::config::Config;

/// API version prefix appended to the base URL.
const API_VERSION_PATH: &str = "v2/";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("line-bot-rust/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Sends one request to the Messaging API.
///
/// `path` is a list of unencoded path segments below the versioned base URL,
/// e.g. `["bot", "profile", user_id]`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Vec<u8>>,
    ) -> impl Future<Output = Result<RawResponse, ApiError>> + Send;
}

/// [`Transport`] backed by `reqwest` with bearer-token auth.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    access_token: Zeroizing<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Build a transport for `base_url` (a trailing slash is added if missing).
    pub fn new(
        base_url: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .and_then(|url| url.join(API_VERSION_PATH))
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_token: Zeroizing::new(access_token.into()),
        })
    }

    /// Build a transport from the bot configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.channel_access_token.as_str(),
            config.http_timeout,
        )
    }

    /// Versioned base URL, e.g. `https://api.line.me/v2/`.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments against the base URL, percent-encoding each one.
    fn url(&self, path: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.url(path)?;
        debug!(%method, url = %url, "Calling Messaging API");

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(self.access_token.as_str())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawResponse { status, body })
    }
}
