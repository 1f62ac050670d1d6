//! End-to-end roster processing: column check, normalization, matching.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::ingest::RosterTable;
use crate::matcher::{GroupMatcher, MatchOutcome};
use crate::normalize::Normalizer;

/// Turn a roster table into groups.
///
/// Fails when required columns are missing or when nobody is eligible for
/// grouping. Forming zero groups from eligible people is not an error.
pub fn plan_groups(table: &RosterTable, config: &Config) -> Result<MatchOutcome> {
    let missing = table.missing_columns(config);
    if !missing.is_empty() {
        warn!(columns = ?missing, "Roster is missing required columns");
        return Err(RosterError::MissingColumns { columns: missing });
    }

    let cohort = Normalizer::new(config).normalize(table);
    if cohort.eligible_count() == 0 {
        warn!(people = cohort.people.len(), "No eligible people in roster");
        return Err(RosterError::NoValidPeople);
    }

    info!(
        people = cohort.people.len(),
        eligible = cohort.eligible_count(),
        warnings = cohort.warnings.len(),
        "Roster ready for matching"
    );
    Ok(GroupMatcher::new(config).match_cohort(cohort.people))
}
