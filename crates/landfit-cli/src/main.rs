//! landfit - see how many countries fit inside another.
//!
//! Downloads the ranked country land area table once, keeps it in the local
//! cache, and answers one question interactively per run.

mod session;

use std::io;

use anyhow::{Context, Result};
use landfit_core::{load_or_fetch, CacheError, CacheStore, Config, LoadError, SourceClient};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use session::Session;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Attach a hint telling the user what to do about a load failure
fn explain_load_error(error: LoadError, cache: &CacheStore, url: &str) -> anyhow::Error {
    let hint = match &error {
        LoadError::Cache(CacheError::Corrupt { path, .. }) => format!(
            "The saved country list is damaged. Delete {} to download it again",
            path.display()
        ),
        LoadError::Cache(_) => format!(
            "Could not use the cache at {}",
            cache.cache_path().display()
        ),
        LoadError::Acquisition(_) => format!("Could not get the country list from {}", url),
    };
    anyhow::Error::new(error).context(hint)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    info!("landfit starting");

    let config = Config::load();
    let cache = CacheStore::new(config.cache_dir()).context("Failed to prepare the cache directory")?;
    let client = SourceClient::from_config(&config).context("Failed to create HTTP client")?;

    let loaded = load_or_fetch(&cache, || client.fetch_table())
        .await
        .map_err(|e| explain_load_error(e, &cache, client.url()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&loaded.table, stdin.lock(), stdout.lock())
        .run(&loaded.origin)
        .context("Console session failed")?;

    info!("landfit finished");
    Ok(())
}
