//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ROADMAP_HOST` - Bind address (default: 127.0.0.1)
//! - `ROADMAP_PORT` - Listen port (default: 5000)
//! - `ROADMAP_DATA_DIR` - Directory holding the JSON data files (default: data)
//! - `ROADMAP_CORS_ORIGIN` - Front-end origin allowed by CORS (default: <http://localhost:5173>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate, 0.0 to 1.0 (default: 0.0)
//! - `LOG_FORMAT` - `json` for JSON log lines, anything else for text

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

/// Environment variable naming the data directory.
pub const DATA_DIR_VAR: &str = "ROADMAP_DATA_DIR";
/// Data directory used when [`DATA_DIR_VAR`] is unset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,
    /// Origin allowed to call the API from a browser
    pub cors_origin: HeaderValue,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// Emit JSON log lines instead of text
    pub json_logs: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("ROADMAP_HOST", "127.0.0.1")?;
        let port = parse_env("ROADMAP_PORT", "5000")?;
        let data_dir = PathBuf::from(get_env_or_default(DATA_DIR_VAR, DEFAULT_DATA_DIR));
        let cors_origin = parse_env("ROADMAP_CORS_ORIGIN", "http://localhost:5173")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;
        let json_logs = get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            host,
            port,
            data_dir,
            cors_origin,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            json_logs,
        })
    }

    /// Configuration for serving `data_dir` with every other value at its
    /// default.
    #[must_use]
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            data_dir: data_dir.into(),
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            json_logs: false,
        }
    }

    /// Returns the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Data directory from `ROADMAP_DATA_DIR`, or the default.
#[must_use]
pub fn data_dir_from_env() -> PathBuf {
    let _ = dotenvy::dotenv();
    PathBuf::from(get_env_or_default(DATA_DIR_VAR, DEFAULT_DATA_DIR))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    check_rate(key, parse_env(key, default)?)
}

fn check_rate(key: &str, rate: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("ROADMAP_PORT", "http").unwrap_err();
        assert!(err.to_string().contains("ROADMAP_PORT"));
        assert_eq!(parse_value::<u16>("ROADMAP_PORT", "8080").unwrap(), 8080);
    }

    #[test]
    fn test_cors_origin_parses_as_header() {
        let origin: HeaderValue = parse_value("ROADMAP_CORS_ORIGIN", "http://localhost:5173").unwrap();
        assert_eq!(origin, "http://localhost:5173");
        assert!(parse_value::<HeaderValue>("ROADMAP_CORS_ORIGIN", "bad\norigin").is_err());
    }

    #[test]
    fn test_check_rate_bounds() {
        assert!(check_rate("SENTRY_SAMPLE_RATE", 0.0).is_ok());
        assert!(check_rate("SENTRY_SAMPLE_RATE", 1.0).is_ok());
        assert!(check_rate("SENTRY_SAMPLE_RATE", 1.5).is_err());
        assert!(check_rate("SENTRY_SAMPLE_RATE", -0.1).is_err());
    }

    #[test]
    fn test_for_data_dir_defaults() {
        let config = ServerConfig::for_data_dir("/tmp/roadmap");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/roadmap"));
        assert!(config.sentry_dsn.is_none());
    }
}
