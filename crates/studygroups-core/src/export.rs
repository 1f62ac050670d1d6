//! Tabular export of formed groups.
//!
//! One row per group with display names only; member ids do not survive, so
//! an exported file cannot be read back into groups.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::models::Group;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Group ID")]
    pub group_id: String,
    #[serde(rename = "Faith Study")]
    pub faith_study: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Leader")]
    pub leader: String,
    #[serde(rename = "Members")]
    pub members: String,
    #[serde(rename = "Common Availabilities")]
    pub common_availabilities: String,
}

impl From<&Group> for ExportRow {
    fn from(group: &Group) -> Self {
        Self {
            group_id: group.id.clone(),
            faith_study: group.faith_study.clone(),
            gender: group.gender.clone(),
            leader: group.leader_name().unwrap_or("None").to_string(),
            members: group.member_names().join(", "),
            common_availabilities: group.common_availabilities.join(", "),
        }
    }
}

pub fn export_rows(groups: &[Group]) -> Vec<ExportRow> {
    groups.iter().map(ExportRow::from).collect()
}

/// Write groups as CSV with a header row.
pub fn write_groups_csv<W: Write>(groups: &[Group], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in export_rows(groups) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
