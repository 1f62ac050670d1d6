//! Roster ingestion.
//!
//! Turns a survey export into a [`RosterTable`]: ordered headers plus one
//! record of string cells per respondent. Column order matters because the
//! normalizer finds availability columns by position.

mod csv;
mod table;

pub use self::csv::{parse_roster_csv, read_roster_csv};
pub use self::table::{RosterTable, Row};

use std::path::Path;

use crate::error::{Result, RosterError};

/// Load a roster file, choosing the parser from the file extension.
pub fn read_roster(path: &Path) -> Result<RosterTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_roster_csv(path),
        _ => Err(RosterError::UnsupportedFormat { extension }),
    }
}
