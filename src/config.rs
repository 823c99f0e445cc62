//! Configuration Module
//!
//! Handles loading the Pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long fetched responses stay cached, in seconds
    pub cache_ttl_secs: u64,
    /// Base URL of the PokeAPI, without trailing slash
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Cache TTL in seconds (default: 300)
    /// - `POKEAPI_BASE_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2)
    /// - `HTTP_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            api_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// HTTP timeout as a `Duration`.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 10,
        }
    }
}
