//! REPL session state and command handlers
//!
//! A `Session` owns the pagination cursor, the caught pokemon and the
//! RNG used for catch rolls. It reaches the network only through the
//! cache-backed `PokeApiClient`.

use std::collections::BTreeMap;
use std::io::Write;

use rand::Rng;
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::Result;
use crate::models::{LocationAreaPage, PokemonInfo};
use crate::repl::commands::{Command, COMMANDS};

/// Catch difficulty numerator
const CATCH_DIFFICULTY: f64 = 100.0;
/// Offset added to base experience before dividing
const CATCH_SLOPE: f64 = 30.0;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Position in the paged location-area listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Set once any page has been shown
    pub started: bool,
}

impl Pagination {
    fn follow(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

/// Probability of catching a pokemon with the given base experience.
pub fn catch_probability(base_experience: u32) -> f64 {
    CATCH_DIFFICULTY / (f64::from(base_experience) + CATCH_SLOPE)
}

/// State for one interactive session.
#[derive(Debug)]
pub struct Session<R> {
    client: PokeApiClient,
    pagination: Pagination,
    pokedex: BTreeMap<String, PokemonInfo>,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(client: PokeApiClient, rng: R) -> Self {
        Self {
            client,
            pagination: Pagination::default(),
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn pokedex(&self) -> &BTreeMap<String, PokemonInfo> {
        &self.pokedex
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    // == Execute ==
    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "executing command");
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::Cache => self.cache_stats(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "{}: {}", name, description)?;
        }
        Ok(())
    }

    // == Map ==
    /// Shows the next page of location areas.
    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let url = match (&self.pagination.next, self.pagination.started) {
            (Some(next), _) => next.clone(),
            (None, false) => self.client.first_page_url(),
            (None, true) => {
                writeln!(out, "No more location areas available")?;
                return Ok(());
            }
        };

        let page = self.client.location_areas(&url).await?;
        self.show_page(&page, out)?;
        if page.next.is_none() {
            writeln!(out, "No more location areas available")?;
        }
        Ok(())
    }

    /// Shows the previous page of location areas.
    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.pagination.previous.clone() else {
            writeln!(out, "You're on the first page.")?;
            return Ok(());
        };

        let page = self.client.location_areas(&url).await?;
        self.show_page(&page, out)
    }

    fn show_page<W: Write>(&mut self, page: &LocationAreaPage, out: &mut W) -> Result<()> {
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.pagination.follow(page);
        Ok(())
    }

    // == Explore ==
    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let detail = self.client.explore(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &detail.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    // == Catch ==
    /// Throws a Pokeball; the first successful catch is kept.
    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let info = self.client.pokemon(name).await?;

        let probability = catch_probability(info.experience());
        let roll: f64 = self.rng.gen();
        debug!(name, probability, roll, "catch roll");

        if roll <= probability {
            writeln!(out, "{} was caught!", name)?;
            if !self.pokedex.contains_key(name) {
                writeln!(out, "You may now inspect it with the inspect command.")?;
                self.pokedex.insert(name.to_string(), info);
            }
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    // == Inspect ==
    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty.")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let cache = self.client.cache();
        let stats = cache.stats();
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        writeln!(
            out,
            "ttl: {}s, hit rate: {:.1}%",
            cache.ttl().as_secs(),
            stats.hit_rate() * 100.0
        )?;
        Ok(())
    }
}
