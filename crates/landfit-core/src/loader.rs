//! Cache-or-fetch orchestration.
//!
//! A present cache is always used, and a corrupt one is an error rather than
//! a reason to download again. The source is only contacted when no cache
//! exists, and its result is saved before being returned.

use std::future::Future;

use thiserror::Error;
use tracing::{debug, info};

use crate::api::AcquisitionError;
use crate::cache::{CacheError, CacheStore};
use crate::models::CountryAreaTable;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not download country areas: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Where a loaded table came from
#[derive(Debug, Clone, PartialEq)]
pub enum TableOrigin {
    /// Read from the cache, with a human readable age
    Cache { age: String },
    /// Downloaded during this run
    Fetched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: CountryAreaTable,
    pub origin: TableOrigin,
}

pub async fn load_or_fetch<F, Fut>(cache: &CacheStore, fetch: F) -> Result<LoadedTable, LoadError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<CountryAreaTable, AcquisitionError>>,
{
    if cache.exists() {
        let cached = cache.load()?;
        let age = cached.age_display();
        debug!(%age, "Using cached country areas");
        return Ok(LoadedTable {
            table: cached.data,
            origin: TableOrigin::Cache { age },
        });
    }

    info!("No cached country areas, downloading");
    let table = fetch().await?;
    cache.save(&table)?;

    Ok(LoadedTable {
        table,
        origin: TableOrigin::Fetched,
    })
}
