//! Local caching of the country area table.
//!
//! This module provides the `CacheStore` for keeping the fetched table on
//! disk so the source page is downloaded at most once. The cache never
//! expires; delete the file to force a new download.

pub mod error;
pub mod manager;

pub use error::CacheError;
pub use manager::{CacheStore, CachedData};
