//! Response models for the PokeAPI
//!
//! This module defines the JSON shapes decoded from cached or freshly
//! fetched response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    AreaDetail, LocationAreaPage, NamedResource, PokemonEncounter, PokemonInfo, PokemonStat,
    PokemonType,
};
