//! Environment-driven configuration.

use crate::error::{Error, Result};
use std::time::Duration;

/// Environment variable holding the service API key.
pub const API_KEY_VAR: &str = "FIRECRAWL_API_KEY";
/// Environment variable overriding the service base URL.
pub const API_URL_VAR: &str = "FIRECRAWL_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "FIRECRAWL_TIMEOUT_SECS";

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings needed to talk to the scrape service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service API key.
    pub api_key: String,
    /// Service base URL.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Load settings from the process environment.
    ///
    /// A `.env` file in the working directory is read first if one exists;
    /// variables already set in the environment win over it.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", API_KEY_VAR)))?;

        let base_url = lookup(API_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_VAR, raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
