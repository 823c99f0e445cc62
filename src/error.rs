//! Error types for the cache and the Pokedex client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the expiring cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Empty key or empty value passed to `add`
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A zero TTL would make the reaper spin
    #[error("Invalid TTL: must be greater than zero")]
    InvalidTtl,

    /// The reaper needs a tokio runtime to be spawned on
    #[error("No tokio runtime available to run the reaper")]
    NoRuntime,
}

// == Pokedex Error Enum ==
/// Errors surfaced by the PokeAPI client and the command loop.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// HTTP request failed
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON shape
    #[error("error decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Cache rejected the payload
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Configured API base URL cannot be used to build endpoint URLs
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// Input named no known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Writing to the console failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for the client and command loop.
pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = PokedexError::MissingArgument {
            command: "explore",
            argument: "area",
        };
        assert_eq!(err.to_string(), "usage: explore <area>");
    }

    #[test]
    fn test_cache_error_is_transparent() {
        let err: PokedexError = CacheError::InvalidInput("key is empty".to_string()).into();
        assert_eq!(err.to_string(), "Invalid input: key is empty");
    }
}
