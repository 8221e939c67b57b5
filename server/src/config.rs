//! Bot Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;

use line_crypto::ChannelSecret;
use zeroize::Zeroizing;

/// Default Messaging API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me/";

/// Bot configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Channel secret used to verify webhook signatures
    pub channel_secret: ChannelSecret,

    /// Long-lived channel access token for the Messaging API
    pub channel_access_token: Zeroizing<String>,

    /// Messaging API base URL (default: `https://api.line.me/`)
    pub api_base_url: String,

    /// Outbound HTTP timeout (default: 30s)
    pub http_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("channel_secret", &self.channel_secret)
            .field("channel_access_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            channel_secret: env::var("LINE_CHANNEL_SECRET")
                .context("LINE_CHANNEL_SECRET must be set")?
                .into(),
            channel_access_token: Zeroizing::new(
                env::var("LINE_CHANNEL_ACCESS_TOKEN")
                    .context("LINE_CHANNEL_ACCESS_TOKEN must be set")?,
            ),
            api_base_url: env::var("LINE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        })
    }

    /// Create a config for testing purposes.
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            channel_secret: ChannelSecret::from("test-channel-secret"),
            channel_access_token: Zeroizing::new("test-access-token".into()),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "BIND_ADDRESS",
        "LINE_CHANNEL_SECRET",
        "LINE_CHANNEL_ACCESS_TOKEN",
        "LINE_API_BASE_URL",
        "HTTP_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn requires_channel_credentials() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("LINE_CHANNEL_SECRET"));

        env::set_var("LINE_CHANNEL_SECRET", "secret");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("LINE_CHANNEL_ACCESS_TOKEN"));
        clear_env();
    }

    #[test]
    #[serial]
    fn applies_defaults() {
        clear_env();
        env::set_var("LINE_CHANNEL_SECRET", "secret");
        env::set_var("LINE_CHANNEL_ACCESS_TOKEN", "token");
        env::set_var("HTTP_TIMEOUT_SECS", "not-a-number");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.channel_access_token.as_str(), "token");
        clear_env();
    }

    #[test]
    fn debug_redacts_credentials() {
        let rendered = format!("{:?}", Config::default_for_test());
        assert!(!rendered.contains("test-access-token"));
        assert!(!rendered.contains("test-channel-secret"));
        assert!(rendered.contains("127.0.0.1:8080"));
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        env::set_var("LINE_CHANNEL_SECRET", "secret");
        env::set_var("LINE_CHANNEL_ACCESS_TOKEN", "token");
        env::set_var("BIND_ADDRESS", "127.0.0.1:9000");
        env::set_var("LINE_API_BASE_URL", "http://localhost:4010/");
        env::set_var("HTTP_TIMEOUT_SECS", "5");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.api_base_url, "http://localhost:4010/");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        clear_env();
    }
}
