//! Data models for country area data.
//!
//! - `CountryArea`: a single country and its land area in square kilometres
//! - `CountryAreaTable`: the ranked table, largest country first

pub mod country;

pub use country::{CountryArea, CountryAreaTable, TableError};
