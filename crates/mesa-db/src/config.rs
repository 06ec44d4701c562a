//! Database configuration from the environment.
//!
//! A `.env` file in the working directory (or a parent) is loaded first, then
//! values are read from the process environment.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DATABASE_URL` | yes | none (`sqlite:` URL or a file path) |
//! | `DATABASE_MAX_CONNECTIONS` | no | 5 |
//! | `DATABASE_CONNECT_TIMEOUT_SECS` | no | 30 |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::pool::DbConfig;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const DATABASE_CONNECT_TIMEOUT_SECS: &str = "DATABASE_CONNECT_TIMEOUT_SECS";

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load .env file: {0}")]
    EnvFile(String),
}

impl DbConfig {
    /// Loads `.env` and builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => return Err(ConfigError::EnvFile(e.to_string())),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired(DATABASE_URL.to_string()))?;

        let mut config = if url.starts_with("sqlite:") {
            DbConfig::from_url(url)
        } else {
            DbConfig::new(url)
        };

        if let Some(max) = parse_var::<u32, _>(&lookup, DATABASE_MAX_CONNECTIONS)? {
            if max == 0 {
                return Err(ConfigError::InvalidValue(DATABASE_MAX_CONNECTIONS.to_string()));
            }
            config = config.max_connections(max);
        }

        if let Some(secs) = parse_var::<u64, _>(&lookup, DATABASE_CONNECT_TIMEOUT_SECS)? {
            config = config.connect_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
    }
}
