//! Utility functions for string formatting and manipulation.

pub mod format;

pub use format::{capitalize, parse_list, truncate_string};
