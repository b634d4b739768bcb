use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use crate::models::{CountryArea, CountryAreaTable};

use super::CacheError;

/// Cache file name inside the cache directory
const CACHE_FILE: &str = "country_areas.json";

/// Scratch files are named `.country_areas.json.<random>.tmp`, one per save
const TEMP_PREFIX: &str = ".country_areas.json.";
const TEMP_SUFFIX: &str = ".tmp";

/// Bumped whenever the on-disk layout changes; older files read as corrupt.
const CACHE_FORMAT_VERSION: u32 = 1;

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile<E> {
    version: u32,
    cached_at: DateTime<Utc>,
    entries: E,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

pub struct CacheStore {
    cache_dir: PathBuf,
}

impl CacheStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self, CacheError> {
        fs::create_dir_all(&cache_dir).map_err(|source| CacheError::Write {
            path: cache_dir.clone(),
            source,
        })?;
        Ok(Self { cache_dir })
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE)
    }

    pub fn exists(&self) -> bool {
        self.cache_path().is_file()
    }

    pub fn load(&self) -> Result<CachedData<CountryAreaTable>, CacheError> {
        let path = self.cache_path();

        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CacheError::NotFound { path });
            }
            Err(source) => return Err(CacheError::Unreadable { path, source }),
        };

        let corrupt = |reason: String| CacheError::Corrupt {
            path: path.clone(),
            reason,
        };

        let file: CacheFile<Vec<CountryArea>> =
            serde_json::from_slice(&contents).map_err(|e| corrupt(e.to_string()))?;

        if file.version != CACHE_FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {} (expected {})",
                file.version, CACHE_FORMAT_VERSION
            )));
        }

        let table = CountryAreaTable::new(file.entries).map_err(|e| corrupt(e.to_string()))?;
        debug!(path = %path.display(), countries = table.len(), "Loaded cached country areas");

        Ok(CachedData {
            data: table,
            cached_at: file.cached_at,
        })
    }

    /// Replace the cache with `table`.
    ///
    /// The new contents go to a scratch file of their own, which is synced
    /// and then renamed over the cache. Readers see either the old table or
    /// the new one, and concurrent saves never share a scratch file. A failed
    /// save removes only its own scratch file.
    pub fn save(&self, table: &CountryAreaTable) -> Result<(), CacheError> {
        let path = self.cache_path();

        let file = CacheFile {
            version: CACHE_FORMAT_VERSION,
            cached_at: Utc::now(),
            entries: table.entries(),
        };
        let contents = serde_json::to_vec_pretty(&file)?;

        let scratch = self.write_scratch(&contents)?;
        scratch.persist(&path).map_err(|e| CacheError::Write {
            path: path.clone(),
            source: e.error,
        })?;

        info!(path = %path.display(), countries = table.len(), "Saved country areas to cache");
        Ok(())
    }

    /// Dropping the returned file deletes it, so every early return cleans up.
    fn write_scratch(&self, contents: &[u8]) -> Result<NamedTempFile, CacheError> {
        let write_error = |source: io::Error| CacheError::Write {
            path: self.cache_dir.clone(),
            source,
        };

        let mut scratch = Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.cache_dir)
            .map_err(write_error)?;
        scratch.write_all(contents).map_err(write_error)?;
        scratch.as_file().sync_all().map_err(write_error)?;
        Ok(scratch)
    }
}

// ============================================================================
// Tests
// ============================================================================
