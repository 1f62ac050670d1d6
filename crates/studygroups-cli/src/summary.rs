//! Plain-text rendering of groups for the terminal.

use std::fmt::Write;

use studygroups_core::utils::truncate_string;
use studygroups_core::{Group, MatchOutcome};

// ===== Column widths =====

const ID_WIDTH: usize = 5;
const STUDY_WIDTH: usize = 14;
const GENDER_WIDTH: usize = 8;
const LEADER_WIDTH: usize = 20;
/// Width of the members column; longer lists are cut with "...".
const MEMBERS_WIDTH: usize = 48;

/// Table of groups, one line each, followed by their common slots.
pub fn render_groups(groups: &[Group]) -> String {
    let mut out = String::new();
    if groups.is_empty() {
        out.push_str("No groups formed.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<ID_WIDTH$} {:<STUDY_WIDTH$} {:<GENDER_WIDTH$} {:>4}  {:<LEADER_WIDTH$} {}",
        "ID", "Study", "Gender", "Size", "Leader", "Members"
    );
    for group in groups {
        let leader = group.leader_name().unwrap_or("None");
        let members = group.member_names().join(", ");
        let _ = writeln!(
            out,
            "{:<ID_WIDTH$} {:<STUDY_WIDTH$} {:<GENDER_WIDTH$} {:>4}  {:<LEADER_WIDTH$} {}",
            group.id,
            truncate_string(&group.faith_study, STUDY_WIDTH),
            truncate_string(&group.gender, GENDER_WIDTH),
            group.size(),
            truncate_string(leader, LEADER_WIDTH),
            truncate_string(&members, MEMBERS_WIDTH),
        );
        let _ = writeln!(
            out,
            "{:ID_WIDTH$} slots: {}",
            "",
            group.common_availabilities.join("; ")
        );
    }
    out
}

/// Counts shown after a matching run.
pub fn render_outcome(outcome: &MatchOutcome) -> String {
    let mut out = render_groups(&outcome.groups);
    let grouped: usize = outcome.groups.iter().map(Group::size).sum();
    let _ = writeln!(
        out,
        "\n{} people, {} eligible, {} grouped into {} groups",
        outcome.people.len(),
        outcome.eligible_count(),
        grouped,
        outcome.groups.len()
    );

    let excluded = outcome.excluded();
    if !excluded.is_empty() {
        let _ = writeln!(out, "Excluded (blank gender or no study left): {}", excluded.join(", "));
    }
    let unmatched = outcome.unmatched();
    if !unmatched.is_empty() {
        let _ = writeln!(out, "Not placed: {}", unmatched.join(", "));
    }
    out
}
