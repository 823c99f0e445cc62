//! Pokedex - A PokeAPI explorer backed by an expiring response cache
//!
//! Fetched response bodies are memoized in an `ExpiringCache` whose
//! background reaper removes entries once they reach the configured TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::ExpiringCache;
pub use config::Config;
pub use error::{CacheError, PokedexError};
