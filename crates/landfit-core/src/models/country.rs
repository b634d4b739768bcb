use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryArea {
    pub name: String,
    /// Land area in square kilometres
    pub area: f64,
}

impl CountryArea {
    pub fn new(name: impl Into<String>, area: f64) -> Self {
        Self {
            name: name.into(),
            area,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Duplicate country: {name}")]
    DuplicateCountry { name: String },

    #[error("Out of order at row {index}: {name} ({area}) is larger than the previous row ({previous})")]
    OutOfOrder {
        index: usize,
        name: String,
        area: f64,
        previous: f64,
    },

    #[error("Invalid area for {name}: {area}")]
    InvalidArea { name: String, area: f64 },
}

/// Countries ranked by land area, largest first.
///
/// The only way to build one is [`CountryAreaTable::new`], which rejects
/// duplicate names, negative or non-finite areas and rows that are not in
/// descending order. Equal areas keep their given order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountryAreaTable {
    entries: Vec<CountryArea>,
}

impl CountryAreaTable {
    pub fn new(entries: Vec<CountryArea>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut previous: Option<f64> = None;

        for (index, entry) in entries.iter().enumerate() {
            if !entry.area.is_finite() || entry.area < 0.0 {
                return Err(TableError::InvalidArea {
                    name: entry.name.clone(),
                    area: entry.area,
                });
            }
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(TableError::DuplicateCountry {
                    name: entry.name.clone(),
                });
            }
            if let Some(prev) = previous {
                if entry.area > prev {
                    return Err(TableError::OutOfOrder {
                        index,
                        name: entry.name.clone(),
                        area: entry.area,
                        previous: prev,
                    });
                }
            }
            previous = Some(entry.area);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CountryArea> {
        self.entries.get(index)
    }

    pub fn area_of(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.area)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryArea> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CountryArea] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Find a country by name, ignoring case and surrounding whitespace
    pub fn position(&self, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| e.name.to_lowercase() == needle)
    }
}

impl<'a> IntoIterator for &'a CountryAreaTable {
    type Item = &'a CountryArea;
    type IntoIter = std::slice::Iter<'a, CountryArea>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
