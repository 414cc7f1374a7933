//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Latitude used when a request carries none
pub const DEFAULT_LAT: &str = "28.7040592";

/// Longitude used when a request carries none
pub const DEFAULT_LNG: &str = "77.10249019999999";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream restaurant API configuration
    pub upstream: UpstreamConfig,
    /// Coordinates applied to requests without `lat`/`lng`
    pub defaults: DefaultCoordinates,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Deployment environment name (`development` enables error details)
    pub environment: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Scheme and host of the upstream API, without trailing slash
    pub base_url: String,
    /// Outbound request timeout in milliseconds
    pub timeout_ms: u64,
    /// User-Agent sent to the upstream API
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultCoordinates {
    pub lat: String,
    pub lng: String,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (`*` allows any)
    pub cors_origins: Vec<String>,
    /// Requests allowed per client within one window
    pub rate_limit_max: u32,
    /// Sliding window length in seconds
    pub rate_limit_window_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directives, e.g. `info` or `foodproxy=debug,tower_http=info`
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            upstream: UpstreamConfig {
                base_url: "https://www.swiggy.com".to_string(),
                timeout_ms: 8000,
                user_agent: "Mozilla/5.0".to_string(),
            },
            defaults: DefaultCoordinates {
                lat: DEFAULT_LAT.to_string(),
                lng: DEFAULT_LNG.to_string(),
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
                rate_limit_max: 100,
                rate_limit_window_secs: 15 * 60,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
            environment: "production".to_string(),
        }
    }
}

impl Settings {
    /// Create a new configuration instance from `.env` and the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", &defaults.server.host),
                port: get("SERVER_PORT", "8080")
                    .parse()
                    .context("Invalid port number")?,
            },
            upstream: UpstreamConfig {
                base_url: get("UPSTREAM_BASE_URL", &defaults.upstream.base_url)
                    .trim_end_matches('/')
                    .to_string(),
                timeout_ms: get("REQUEST_TIMEOUT_MS", "8000")
                    .parse()
                    .context("Invalid request timeout")?,
                user_agent: get("UPSTREAM_USER_AGENT", &defaults.upstream.user_agent),
            },
            defaults: DefaultCoordinates {
                lat: get("DEFAULT_LAT", DEFAULT_LAT),
                lng: get("DEFAULT_LNG", DEFAULT_LNG),
            },
            security: SecurityConfig {
                cors_origins: get("CORS_ORIGIN", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                rate_limit_max: get("RATE_LIMIT_MAX", "100")
                    .parse()
                    .context("Invalid rate limit maximum")?,
                rate_limit_window_secs: get("RATE_LIMIT_WINDOW_SECS", "900")
                    .parse()
                    .context("Invalid rate limit window")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
            environment: get("NODE_ENV", &defaults.environment),
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            anyhow::bail!(
                "Invalid upstream base URL '{}', should start with 'http://' or 'https://'",
                self.upstream.base_url
            );
        }

        if self.upstream.timeout_ms == 0 {
            anyhow::bail!("Request timeout cannot be 0");
        }

        self.defaults
            .lat
            .parse::<f64>()
            .with_context(|| format!("Invalid default latitude: {}", self.defaults.lat))?;
        self.defaults
            .lng
            .parse::<f64>()
            .with_context(|| format!("Invalid default longitude: {}", self.defaults.lng))?;

        if self.security.cors_origins.is_empty() {
            anyhow::bail!("At least one CORS origin is required");
        }

        if self.security.rate_limit_max == 0 {
            anyhow::bail!("Rate limit maximum cannot be 0");
        }

        if self.security.rate_limit_window_secs == 0 {
            anyhow::bail!("Rate limit window cannot be 0");
        }

        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log filter: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Outbound request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream.timeout_ms)
    }

    /// Rate limit window length
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.security.rate_limit_window_secs)
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.security.cors_origins.iter().any(|o| o == "*")
    }

    /// Check if in development mode
    pub fn is_dev_mode(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}
