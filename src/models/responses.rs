//! PokeAPI response shapes
//!
//! Only the fields the command loop uses are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// A `{ "name": ..., "url": ... }` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area/`.
///
/// `next` and `previous` are null at either end of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    #[serde(default)]
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `GET /location-area/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDetail {
    #[serde(default)]
    pub name: String,
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// `GET /pokemon/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonInfo {
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl PokemonInfo {
    /// Base experience, counting a missing value as zero.
    pub fn experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
