//! Configuration management for cloudinary-fs
//!
//! Settings are loaded from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! ## Credentials
//! - `CLOUDINARY_URL`: `cloudinary://<api_key>:<api_secret>@<cloud_name>`
//! - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`:
//!   individual overrides, take precedence over `CLOUDINARY_URL`
//!
//! ## Behaviour
//! - `CLOUDINARY_RESOURCE_TYPE`: image|video|raw - default: "raw"
//! - `CLOUDINARY_API_BASE`: default "https://api.cloudinary.com"
//! - `CLOUDINARY_DELIVERY_BASE`: default "https://res.cloudinary.com"
//! - `CLOUDINARY_REQUEST_TIMEOUT`: timeout in seconds - default: "30"
//! - `CLOUDINARY_FS_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use cloudinary_fs::{CloudinaryAdapter, CloudinaryConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CloudinaryConfig::default();
//! config.validate()?;
//!
//! let adapter = CloudinaryAdapter::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

use crate::api::{ApiError, CloudinaryClient};
use reqwest::Url;
use std::env;
use std::fmt;
use thiserror::Error;
use tracing::warn;

const DEFAULT_RESOURCE_TYPE: &str = "raw";
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

const RESOURCE_TYPES: &[&str] = &["image", "video", "raw"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cloud name not specified. Set CLOUDINARY_URL or CLOUDINARY_CLOUD_NAME")]
    MissingCloudName,

    #[error("API credentials not specified. Set CLOUDINARY_URL or CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET")]
    MissingCredentials,

    /// A URL setting could not be parsed
    #[error("Invalid URL for {field}: {url}")]
    InvalidUrl { field: String, url: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// HTTP client construction failed
    #[error("Client initialization failed: {0}")]
    ClientBuild(#[from] ApiError),
}

/// Connection settings for a Cloudinary account
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,

    /// Resource type all keys live under (image, video or raw)
    pub resource_type: String,

    /// Base URL of the Admin and Upload APIs
    pub api_base: String,

    /// Base URL content is streamed from
    pub delivery_base: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for CloudinaryConfig {
    /// Loads configuration from environment variables with defaults
    ///
    /// An unparseable `CLOUDINARY_URL` is ignored with a warning; `validate`
    /// then reports whatever is still missing.
    fn default() -> Self {
        let mut config = env::var("CLOUDINARY_URL")
            .ok()
            .and_then(|url| match Self::from_url(&url) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("Ignoring CLOUDINARY_URL: {}", e);
                    None
                }
            })
            .unwrap_or_else(|| Self::new("", "", ""));

        if let Ok(cloud_name) = env::var("CLOUDINARY_CLOUD_NAME") {
            config.cloud_name = cloud_name;
        }
        if let Ok(api_key) = env::var("CLOUDINARY_API_KEY") {
            config.api_key = api_key;
        }
        if let Ok(api_secret) = env::var("CLOUDINARY_API_SECRET") {
            config.api_secret = api_secret;
        }

        if let Ok(resource_type) = env::var("CLOUDINARY_RESOURCE_TYPE") {
            config.resource_type = resource_type.to_lowercase();
        }
        if let Ok(api_base) = env::var("CLOUDINARY_API_BASE") {
            config.api_base = api_base;
        }
        if let Ok(delivery_base) = env::var("CLOUDINARY_DELIVERY_BASE") {
            config.delivery_base = delivery_base;
        }

        config.request_timeout_secs = env::var("CLOUDINARY_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        config.log_level = env::var("CLOUDINARY_FS_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        config
    }
}

impl CloudinaryConfig {
    /// Creates a configuration with explicit credentials and default settings,
    /// without reading the environment
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            resource_type: DEFAULT_RESOURCE_TYPE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            delivery_base: DEFAULT_DELIVERY_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Parses a `cloudinary://<api_key>:<api_secret>@<cloud_name>` URL
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidUrl {
            field: "CLOUDINARY_URL".to_string(),
            url: redact(url),
        };

        let parsed = Url::parse(url).map_err(|_| invalid())?;
        if parsed.scheme() != "cloudinary" {
            return Err(invalid());
        }

        let cloud_name = parsed.host_str().filter(|h| !h.is_empty());
        let api_key = Some(parsed.username()).filter(|k| !k.is_empty());
        let api_secret = parsed.password().filter(|s| !s.is_empty());

        match (cloud_name, api_key, api_secret) {
            (None, _, _) => Err(ConfigError::MissingCloudName),
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                Ok(Self::new(cloud_name, api_key, api_secret))
            }
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if credentials are missing or any setting is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cloud_name.trim().is_empty() {
            return Err(ConfigError::MissingCloudName);
        }
        if self.api_key.trim().is_empty() || self.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        if !RESOURCE_TYPES.contains(&self.resource_type.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid resource type: {}. Valid options: image, video, raw",
                self.resource_type
            )));
        }

        for (field, url) in [
            ("CLOUDINARY_API_BASE", &self.api_base),
            ("CLOUDINARY_DELIVERY_BASE", &self.delivery_base),
        ] {
            match Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => {
                    return Err(ConfigError::InvalidUrl {
                        field: field.to_string(),
                        url: url.clone(),
                    })
                }
            }
        }

        // Validate timeout is reasonable (at least 1 second, max 10 minutes)
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Validates the configuration and builds an HTTP client from it
    pub fn create_client(&self) -> Result<CloudinaryClient, ConfigError> {
        self.validate()?;
        Ok(CloudinaryClient::new(self)?)
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("resource_type", &self.resource_type)
            .field("api_base", &self.api_base)
            .field("delivery_base", &self.delivery_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl fmt::Display for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cloudinary Configuration:")?;
        writeln!(f, "  Cloud Name: {}", self.cloud_name)?;
        writeln!(f, "  API Key: {}", self.api_key)?;
        writeln!(f, "  Resource Type: {}", self.resource_type)?;
        writeln!(f, "  API Base: {}", self.api_base)?;
        writeln!(f, "  Delivery Base: {}", self.delivery_base)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

/// Strips the secret from a credentials URL before it is echoed in errors
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://<redacted>@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
