//! Configuration module for the Imgur client.
//!
//! This module handles loading and validating configuration from TOML files
//! and the environment.
//!
//! # Configuration Sources (in order of priority)
//! 1. `IMGUR_*` environment variables (credentials only)
//! 2. `asyncgur.local.toml` - Local overrides (gitignored)
//! 3. `asyncgur.toml` - Main configuration file
//! 4. Default values
//!
//! # Example
//! ```rust,ignore
//! let config = Config::load("asyncgur.toml")?;
//! println!("Talking to {}", config.api.base_url);
//! ```

use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Public API endpoint, version 3
pub const DEFAULT_BASE_URL: &str = "https://api.imgur.com/3/";
/// OAuth2 endpoint root
pub const DEFAULT_OAUTH_URL: &str = "https://api.imgur.com/oauth2/";

const LOCAL_CONFIG_FILE: &str = "asyncgur.local.toml";
const CONFIG_FILE: &str = "asyncgur.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the versioned REST API
    pub base_url: String,
    /// Root of the OAuth2 endpoints
    pub oauth_url: String,
    /// Whole-request timeout in seconds
    pub timeout_seconds: u64,
    /// Connect timeout in seconds
    pub connect_timeout_seconds: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            oauth_url: DEFAULT_OAUTH_URL.to_string(),
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: concat!("asyncgur/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Connect timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Application credentials
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Registered application client ID
    pub client_id: String,
    /// Application secret, needed only for token refresh
    pub client_secret: Option<String>,
    /// OAuth access token for user-scoped endpoints
    pub access_token: Option<String>,
    /// OAuth refresh token
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Client-side request pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable local pacing
    pub enabled: bool,
    /// Maximum requests per window
    pub requests_per_window: u32,
    /// Window duration in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            requests_per_window: 50,
            window_seconds: 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Create a configuration for a client ID with defaults everywhere else
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig {
                client_id: client_id.into(),
                ..AuthConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from a file path
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed or validated
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from default locations
    ///
    /// Tries `asyncgur.local.toml`, then `asyncgur.toml`, then built-in
    /// defaults. `IMGUR_*` environment variables are applied on top.
    ///
    /// # Errors
    /// Returns `ConfigError` if a file exists but is invalid, or if no
    /// client ID is available from any source
    pub fn load_default() -> Result<Self, ConfigError> {
        let config = Self::discover(".")?;
        config.validate()?;
        Ok(config)
    }

    /// Read the first of `asyncgur.local.toml` or `asyncgur.toml` found in
    /// `dir` (defaults if neither exists) and overlay the environment.
    ///
    /// The result is not validated, so callers can fill in missing values
    /// before calling [`Config::validate`].
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let file = [LOCAL_CONFIG_FILE, CONFIG_FILE]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists());

        let mut config = match file {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Overlay credentials from `IMGUR_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(client_id) = non_empty("IMGUR_CLIENT_ID") {
            self.auth.client_id = client_id;
        }
        if let Some(secret) = non_empty("IMGUR_CLIENT_SECRET") {
            self.auth.client_secret = Some(secret);
        }
        if let Some(token) = non_empty("IMGUR_ACCESS_TOKEN") {
            self.auth.access_token = Some(token);
        }
        if let Some(token) = non_empty("IMGUR_REFRESH_TOKEN") {
            self.auth.refresh_token = Some(token);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.client_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "client_id is required (set [auth].client_id or IMGUR_CLIENT_ID)".to_string(),
            ));
        }

        for (name, value) in [
            ("base_url", &self.api.base_url),
            ("oauth_url", &self.api.oauth_url),
        ] {
            let url = Url::parse(value).map_err(|e| {
                ConfigError::ValidationError(format!("{} is not a valid URL: {}", name, e))
            })?;
            if url.cannot_be_a_base() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be used as a base URL",
                    name
                )));
            }
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than zero".to_string(),
            ));
        }

        if self.rate_limit.enabled
            && (self.rate_limit.requests_per_window == 0 || self.rate_limit.window_seconds == 0)
        {
            return Err(ConfigError::ValidationError(
                "requests_per_window and window_seconds must be greater than zero".to_string(),
            ));
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of: {:?}",
                valid_formats
            )));
        }

        Ok(())
    }
}
