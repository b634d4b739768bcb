//! Utility functions for rendering areas and country lists.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_area, format_list};
