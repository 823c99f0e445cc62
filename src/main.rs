//! Pokedex - A PokeAPI explorer backed by an expiring response cache

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{Config, ExpiringCache, PokeApiClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache and start its reaper
/// 4. Run the command loop on stdin/stdout
/// 5. Stop the reaper before exiting
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; RUST_LOG overrides
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, api_base_url={}, http_timeout={}s",
        config.cache_ttl_secs, config.api_base_url, config.http_timeout_secs
    );

    let cache = Arc::new(ExpiringCache::new(config.cache_ttl())?);
    let client = PokeApiClient::from_config(&config, cache.clone())?;
    let mut session = Session::new(client, StdRng::from_entropy());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let result = repl::run(&mut session, stdin, &mut stdout).await;

    // The session holds the other handle to the cache
    drop(session);
    match Arc::try_unwrap(cache) {
        Ok(cache) => cache.shutdown().await,
        Err(_) => info!("cache still shared at exit, reaper cancelled on drop"),
    }

    info!("Pokedex shutdown complete");
    Ok(result?)
}
