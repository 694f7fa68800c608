//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GOLFLOW_BACKEND_URL` - Base URL of the shop backend (e.g. `http://localhost:8080/`)
//!
//! ## Optional
//! - `GOLFLOW_IDENTITY_FILE` - Where the signed-in username is persisted
//!   (default: `.golflow/identity.json`)
//! - `GOLFLOW_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
//! - `GOLFLOW_STORE_BUFFER` - Mailbox capacity of each entity store (default: 32)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_IDENTITY_FILE: &str = ".golflow/identity.json";
const DEFAULT_STORE_BUFFER: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, always ending in `/`
    pub backend_url: Url,
    /// File backing the persisted identity
    pub identity_file: PathBuf,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
    /// Channel capacity for the cart and catalog stores
    pub store_buffer: usize,
}

impl Config {
    /// Builds a configuration for `backend_url` with every optional setting at its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse.
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_base_url("GOLFLOW_BACKEND_URL", backend_url)?,
            identity_file: PathBuf::from(DEFAULT_IDENTITY_FILE),
            request_timeout: None,
            store_buffer: DEFAULT_STORE_BUFFER,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the backend URL is missing or any variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = Self::new(&get_required_env("GOLFLOW_BACKEND_URL")?)?;

        if let Some(path) = get_optional_env("GOLFLOW_IDENTITY_FILE") {
            config.identity_file = PathBuf::from(path);
        }
        if let Some(secs) = get_optional_env("GOLFLOW_HTTP_TIMEOUT_SECS") {
            let secs = parse_number::<u64>("GOLFLOW_HTTP_TIMEOUT_SECS", &secs)?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(buffer) = get_optional_env("GOLFLOW_STORE_BUFFER") {
            config.store_buffer = parse_number("GOLFLOW_STORE_BUFFER", &buffer)?;
            if config.store_buffer == 0 {
                return Err(ConfigError::InvalidEnvVar(
                    "GOLFLOW_STORE_BUFFER".to_string(),
                    "must be at least 1".to_string(),
                ));
            }
        }

        Ok(config)
    }
}

/// Relative endpoint paths are joined onto the base, so it must end in `/`.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "not a base URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
