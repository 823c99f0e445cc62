//! API Module
//!
//! HTTP access to the PokeAPI.
//!
//! # Endpoints
//! - `GET /location-area/?limit=20` - Paged list of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::{PokeApiClient, PAGE_SIZE};
