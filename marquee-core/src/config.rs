//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use url::Url;

use crate::MarqueeError;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

/// Movie database API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto. Must end with `/`.
    pub base_url: String,
    /// Bearer read-access token, preferred over `api_key` when both are set
    pub access_token: Option<String>,
    /// Legacy v3 API key sent as the `api_key` query parameter
    pub api_key: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
    /// Response language sent with every request
    pub language: Option<String>,
    /// Whether adult titles are included in search results
    pub include_adult: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3/".to_string(),
            access_token: None,
            api_key: None,
            timeout: Duration::from_secs(10),
            user_agent: "marquee/0.1.0",
            language: None,
            include_adult: false,
        }
    }
}

impl ApiConfig {
    /// Parses the configured base URL, appending a trailing slash if missing
    /// so relative endpoint paths join underneath it.
    ///
    /// # Errors
    /// - `MarqueeError::Configuration` - Base URL is not an absolute URL
    pub fn parsed_base_url(&self) -> Result<Url, MarqueeError> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        Url::parse(&raw).map_err(|e| MarqueeError::Configuration {
            reason: format!("invalid API base URL '{}': {e}", self.base_url),
        })
    }
}

/// Search view behavior.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiescence window before typed text is searched
    pub debounce_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(500),
        }
    }
}

/// Query cache freshness and retention windows.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a search result is served without refetching
    pub search_stale_time: Duration,
    /// How long a search result is retained after its last update
    pub search_gc_time: Duration,
    /// Freshness window for prefetched detail records
    pub detail_stale_time: Duration,
    /// Retention window for prefetched detail records
    pub detail_gc_time: Duration,
    /// Upper bound on cached entries per cache
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            search_stale_time: Duration::ZERO,
            search_gc_time: Duration::from_secs(5 * 60),
            detail_stale_time: Duration::from_secs(10 * 60),
            detail_gc_time: Duration::from_secs(60 * 60),
            max_entries: 500,
        }
    }
}

/// HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("MARQUEE_TMDB_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(token) = std::env::var("MARQUEE_TMDB_TOKEN") {
            if !token.is_empty() {
                config.api.access_token = Some(token);
            }
        }

        if let Ok(key) = std::env::var("MARQUEE_TMDB_API_KEY") {
            if !key.is_empty() {
                config.api.api_key = Some(key);
            }
        }

        if let Ok(timeout) = std::env::var("MARQUEE_HTTP_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.api.timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(language) = std::env::var("MARQUEE_LANGUAGE") {
            if !language.is_empty() {
                config.api.language = Some(language);
            }
        }

        if let Ok(include_adult) = std::env::var("MARQUEE_INCLUDE_ADULT") {
            config.api.include_adult = include_adult.parse().unwrap_or(false);
        }

        if let Ok(debounce) = std::env::var("MARQUEE_DEBOUNCE_MS") {
            if let Ok(millis) = debounce.parse::<u64>() {
                config.search.debounce_delay = Duration::from_millis(millis);
            }
        }

        if let Ok(host) = std::env::var("MARQUEE_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("MARQUEE_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        config
    }

    /// Creates a configuration for tests with a short debounce window.
    pub fn for_testing() -> Self {
        Self {
            search: SearchConfig {
                debounce_delay: Duration::from_millis(10),
            },
            ..Default::default()
        }
    }

    /// Checks cross-field constraints that defaults cannot violate but
    /// environment overrides can.
    ///
    /// # Errors
    /// - `MarqueeError::Configuration` - Base URL unparsable or cache bounds invalid
    pub fn validate(&self) -> Result<(), MarqueeError> {
        self.api.parsed_base_url()?;

        if self.cache.max_entries == 0 {
            return Err(MarqueeError::Configuration {
                reason: "cache max_entries must be at least 1".to_string(),
            });
        }

        if self.cache.detail_gc_time < self.cache.detail_stale_time {
            return Err(MarqueeError::Configuration {
                reason: "detail gc time must not be shorter than its stale time".to_string(),
            });
        }

        Ok(())
    }
}
