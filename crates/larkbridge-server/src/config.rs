//! Relay server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

/// Environment variable naming the comma-separated Lark webhook URLs.
pub const WEBHOOK_URLS_ENV: &str = "LARK_WEBHOOK_URLS";

/// Environment variable overriding the listen address.
pub const BIND_ADDR_ENV: &str = "LARKBRIDGE_BIND_ADDR";

/// Environment variable overriding the outbound request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "LARKBRIDGE_TIMEOUT_SECS";

/// Configuration for the relay server.
///
/// Loaded once at process start and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Destination webhook URLs, tried in order.
    pub webhook_urls: Vec<String>,
    /// Timeout applied to each outbound webhook request.
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            webhook_urls: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl RelayConfig {
    /// Loads configuration from the environment.
    ///
    /// `LARK_WEBHOOK_URLS` is a comma-separated destination list; entries
    /// are trimmed and empty ones dropped. Missing or unparseable variables
    /// fall back to defaults, with an empty destination list meaning every
    /// dispatch will fail.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var(BIND_ADDR_ENV) {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => warn!(addr = %addr, "ignoring unparseable {BIND_ADDR_ENV}"),
            }
        }

        match std::env::var(WEBHOOK_URLS_ENV) {
            Ok(urls) => config.webhook_urls = parse_url_list(&urls),
            Err(_) => warn!("{WEBHOOK_URLS_ENV} is not set, every dispatch will fail"),
        }

        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            match secs.parse::<u64>() {
                Ok(secs) => config.request_timeout = Duration::from_secs(secs),
                Err(_) => warn!(value = %secs, "ignoring unparseable {TIMEOUT_ENV}"),
            }
        }

        config
    }

    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the destination webhook URLs.
    #[must_use]
    pub fn with_webhook_urls(mut self, urls: Vec<String>) -> Self {
        self.webhook_urls = urls;
        self
    }

    /// Append a destination webhook URL.
    #[must_use]
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_urls.push(url.into());
        self
    }

    /// Set the outbound request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Splits a comma-separated URL list, trimming whitespace and dropping
/// empty entries.
fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
