//! Configuration options for the dashboard client

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Configuration options for the dashboard client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// How long free-text search input must stay unchanged before it is used
    pub search_debounce: Duration,

    /// Path prefix every backend route lives under
    pub api_prefix: String,

    /// Value of the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            search_debounce: Duration::from_millis(500),
            api_prefix: "/api".to_string(),
            client_info: concat!("catalog-admin/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the search debounce delay
    pub fn with_search_debounce(mut self, value: Duration) -> Self {
        self.search_debounce = value;
        self
    }

    /// Set the API path prefix
    pub fn with_api_prefix(mut self, value: &str) -> Self {
        self.api_prefix = value.to_string();
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Non-empty path segments of the API prefix
    pub(crate) fn prefix_segments(&self) -> impl Iterator<Item = &str> {
        self.api_prefix.split('/').filter(|s| !s.is_empty())
    }
}

/// Where the backend lives and how to talk to it
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub url: Url,
    pub options: ClientOptions,
}

impl DashboardConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "{} cannot be used as a base URL",
                url_str
            )));
        }
        Ok(Self {
            url,
            options: ClientOptions::default(),
        })
    }

    /// Replace the client options
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let url_str = std::env::var("DASHBOARD_URL").map_err(|_| {
            Error::config("DASHBOARD_URL environment variable not found")
        })?;
        let mut config = Self::new(&url_str)?;

        if let Ok(secs) = std::env::var("DASHBOARD_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::config(format!("DASHBOARD_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.options = config
                .options
                .with_request_timeout(Some(Duration::from_secs(secs)));
        }

        if let Ok(ms) = std::env::var("DASHBOARD_SEARCH_DEBOUNCE_MS") {
            let ms: u64 = ms.parse().map_err(|_| {
                Error::config(format!(
                    "DASHBOARD_SEARCH_DEBOUNCE_MS is not a number: {}",
                    ms
                ))
            })?;
            config.options = config
                .options
                .with_search_debounce(Duration::from_millis(ms));
        }

        Ok(config)
    }
}
