//! PokeAPI client
//!
//! Fetches JSON resources from the PokeAPI, memoizing raw response bodies
//! in the shared `ExpiringCache` keyed by request URL.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{AreaDetail, LocationAreaPage, PokemonInfo};

/// Number of location areas requested per page
pub const PAGE_SIZE: u32 = 20;

/// Client for the PokeAPI with a cache-through fetch path.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base: Url,
    base_url: String,
    cache: Arc<ExpiringCache>,
}

impl PokeApiClient {
    /// Creates a client for `base_url` that stores bodies in `cache`.
    ///
    /// Fails with `PokedexError::InvalidBaseUrl` if `base_url` does not
    /// parse or cannot carry path segments.
    pub fn new(
        base_url: impl Into<String>,
        cache: Arc<ExpiringCache>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|err| PokedexError::InvalidBaseUrl(format!("{}: {}", base_url, err)))?;
        if base.cannot_be_a_base() {
            return Err(PokedexError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base,
            base_url,
            cache,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config, cache: Arc<ExpiringCache>) -> Result<Self> {
        Self::new(config.api_base_url.clone(), cache, config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<ExpiringCache> {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        format!("{}/location-area/?limit={}", self.base_url, PAGE_SIZE)
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        // Checked in `new`: the base can carry path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    // == Fetch ==
    /// Returns the body at `url`, from the cache when present.
    ///
    /// On a miss the body is fetched, stored under `url` and returned.
    /// Concurrent misses on the same URL each fetch.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "cache hit");
            return Ok(body);
        }

        debug!(url, "cache miss, fetching");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?.to_vec();
        // Empty bodies are rejected by the cache but still returned
        if let Err(err) = self.cache.add(url, body.clone()) {
            warn!(url, "response not cached: {}", err);
        }
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Endpoints ==
    /// Fetches one page of location areas by its full URL.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.fetch_json(url).await
    }

    /// Fetches the pokemon encounters of a location area.
    pub async fn explore(&self, area: &str) -> Result<AreaDetail> {
        let url = self.endpoint(&["location-area", area]);
        self.fetch_json(&url).await
    }

    /// Fetches a pokemon's details.
    pub async fn pokemon(&self, name: &str) -> Result<PokemonInfo> {
        let url = self.endpoint(&["pokemon", name]);
        self.fetch_json(&url).await
    }
}
