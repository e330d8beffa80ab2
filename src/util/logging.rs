//! Structured logging setup for cloudinary-fs
//!
//! The library only emits `tracing` events: remote calls at `debug`, mutating
//! operations at `info`, tolerated failures at `warn` and HTTP failures at
//! `error`. Applications embedding the crate can install a subscriber with
//! one of the `init_*` functions below, or bring their own.
//!
//! # Example
//!
//! ```no_run
//! use cloudinary_fs::util::logging;
//!
//! // Reads CLOUDINARY_FS_LOG_LEVEL / CLOUDINARY_FS_LOG_JSON
//! logging::init_from_env();
//!
//! tracing::info!("Application started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for events from this crate
    pub level: Level,

    /// Use JSON output format (for log shippers)
    pub use_json: bool,

    /// Include the module target (e.g., cloudinary_fs::adapter) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with source locations
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a log level from a string, case-insensitively
///
/// Unknown values fall back to `Level::INFO`.
///
/// ```
/// use cloudinary_fs::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber.
///
/// Only the first call has an effect. If another subscriber is already
/// installed the call is reported on stderr and otherwise ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(&config, env::var("RUST_LOG").is_ok());

        let result = if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging not initialized: {}", e);
        }
    });
}

/// Builds the event filter for the crate's own target at `config.level`.
///
/// Unless `RUST_LOG` is set, the HTTP stack underneath is capped at `warn`.
fn build_filter(config: &LoggingConfig, rust_log_set: bool) -> EnvFilter {
    let mut directives = vec![format!("cloudinary_fs={}", config.level)];
    if !rust_log_set {
        directives.extend(["h2=warn", "hyper=warn", "reqwest=warn"].map(String::from));
    }

    directives
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive)
        })
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from environment variables
///
/// - `CLOUDINARY_FS_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
/// - `CLOUDINARY_FS_LOG_JSON` - Use JSON output (true/false)
/// - `RUST_LOG` - Standard Rust log filtering
pub fn init_from_env() {
    let level_str = env::var("CLOUDINARY_FS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let use_json = env::var("CLOUDINARY_FS_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level: parse_level(&level_str),
        use_json,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production();
        assert!(config.use_json);
        assert!(config.include_location);
    }

    #[test]
    fn test_build_filter_includes_crate_level() {
        let filter = build_filter(&LoggingConfig::with_level(Level::DEBUG), false);
        let rendered = filter.to_string().to_lowercase();
        assert!(rendered.contains("cloudinary_fs=debug"));
        assert!(rendered.contains("reqwest=warn"));
    }

    #[test]
    fn test_build_filter_respects_rust_log() {
        let filter = build_filter(&LoggingConfig::default(), true);
        let rendered = filter.to_string().to_lowercase();
        assert!(rendered.contains("cloudinary_fs=info"));
        assert!(!rendered.contains("hyper=warn"));
    }
}
