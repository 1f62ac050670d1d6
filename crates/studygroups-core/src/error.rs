use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a roster from being processed at all.
///
/// Row-level problems never show up here; they become
/// [`FieldWarning`](crate::models::FieldWarning)s on the affected person.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read roster {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file format '{extension}'. Please upload a CSV file.")]
    UnsupportedFormat { extension: String },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster has no header row")]
    EmptyRoster,

    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("No valid people found in the data")]
    NoValidPeople,
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
