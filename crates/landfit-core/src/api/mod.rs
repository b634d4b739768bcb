//! Acquisition of the ranked country area table.
//!
//! This module provides the `SourceClient` for downloading the source page
//! and `parse_table` for turning its HTML table into a `CountryAreaTable`.
//! Only the country and area columns survive; areas become numbers.

pub mod client;
pub mod error;
pub mod parser;

pub use client::SourceClient;
pub use error::AcquisitionError;
pub use parser::parse_table;
