//! Connection settings for the Tushare Pro API.

use std::time::Duration;

/// Default Tushare Pro endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.tushare.pro";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default minimum spacing between two requests issued by one client.
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(0);

/// Explicit client configuration, passed to [`crate::TushareClient::new`].
#[derive(Clone)]
pub struct TushareConfig {
    /// API token issued by Tushare.
    pub token: String,
    /// Base URL requests are posted to.
    pub base_url: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// Minimum interval between consecutive requests.
    pub min_request_interval: Duration,
}

impl TushareConfig {
    /// Create a configuration with default endpoint and timeouts.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the minimum spacing between requests.
    pub const fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }
}

// The token never shows up in logs.
impl std::fmt::Debug for TushareConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TushareConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("min_request_interval", &self.min_request_interval)
            .finish_non_exhaustive()
    }
}
