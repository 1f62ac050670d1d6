use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::table::RosterTable;
use crate::error::{Result, RosterError};

const UTF8_BOM: char = '\u{feff}';

/// Read a CSV roster from disk.
pub fn read_roster_csv(path: &Path) -> Result<RosterTable> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RosterError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RosterError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let table = parse_roster_csv(file)?;
    debug!(path = %path.display(), rows = table.len(), columns = table.headers().len(), "Roster CSV loaded");
    Ok(table)
}

/// Parse CSV roster text from any reader.
///
/// Record lengths may vary since survey exports are not always rectangular.
/// Cells are passed through untrimmed.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<RosterTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix(UTF8_BOM) {
            *first = stripped.to_string();
        }
    }
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(RosterError::EmptyRoster);
    }

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(RosterTable::from_rows(headers, records))
}
