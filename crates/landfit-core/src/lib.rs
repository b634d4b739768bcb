//! landfit core library.
//!
//! Downloads the ranked country land area table, keeps it in a local cache,
//! and answers "which countries fit inside this one" with a greedy fill from
//! the largest country down.
//!
//! - [`api`]: download and parse the source table
//! - [`cache`]: on-disk copy of the table
//! - [`loader`]: cache-or-fetch
//! - [`fit`]: the fit calculator

pub mod api;
pub mod cache;
pub mod config;
pub mod fit;
pub mod loader;
pub mod models;
pub mod utils;

pub use api::{AcquisitionError, SourceClient};
pub use cache::{CacheError, CacheStore, CachedData};
pub use config::Config;
pub use fit::{fit, times_fits, FitRatio, FitResult};
pub use loader::{load_or_fetch, LoadError, LoadedTable, TableOrigin};
pub use models::{CountryArea, CountryAreaTable, TableError};
