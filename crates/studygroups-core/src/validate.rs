//! Move validator.
//!
//! Decides whether moving one person between two existing groups keeps both
//! groups valid. The check is a pure function of the snapshots passed in: it
//! mutates nothing and recomputes the destination's common slots from live
//! membership instead of trusting the stored `common_availabilities`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::models::{find_common_slots, Group, Person};

/// A request to move `person_id` from one group to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MoveRequest {
    pub person_id: String,
    pub from_group_id: String,
    pub to_group_id: String,
}

impl MoveRequest {
    pub fn new(person_id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            from_group_id: from.into(),
            to_group_id: to.into(),
        }
    }
}

/// Why a move was refused. Checks run in declaration order and stop at the
/// first failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// Unknown id, or the person is not a member of the source group.
    #[error("Person or group not found")]
    NotFound,

    #[error("Gender or faith study mismatch")]
    Mismatch,

    #[error("Target group is full (max {max} people)")]
    TargetFull { max: usize },

    #[error("Source group would be too small (min {min} people)")]
    SourceTooSmall { min: usize },

    #[error("No common availability slots")]
    NoCommonAvailability,
}

/// Wire form of a move check: `{valid, reason}` or `{valid, common_slots}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MoveDecision {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_slots: Option<Vec<String>>,
}

impl From<Result<Vec<String>, MoveRejection>> for MoveDecision {
    fn from(result: Result<Vec<String>, MoveRejection>) -> Self {
        match result {
            Ok(common_slots) => Self {
                valid: true,
                reason: None,
                common_slots: Some(common_slots),
            },
            Err(rejection) => Self {
                valid: false,
                reason: Some(rejection.to_string()),
                common_slots: None,
            },
        }
    }
}

/// Check a move, returning the destination's recomputed common slots when
/// it is allowed.
pub fn check_move(
    request: &MoveRequest,
    groups: &[Group],
    people: &[Person],
    config: &Config,
) -> Result<Vec<String>, MoveRejection> {
    let person = people.iter().find(|p| p.id == request.person_id);
    let from = groups.iter().find(|g| g.id == request.from_group_id);
    let to = groups.iter().find(|g| g.id == request.to_group_id);
    let (Some(person), Some(from), Some(to)) = (person, from, to) else {
        return Err(MoveRejection::NotFound);
    };
    // A person listed elsewhere, or already in the destination, is not in
    // the source group.
    if !from.contains(&person.id) || to.contains(&person.id) {
        return Err(MoveRejection::NotFound);
    }

    if person.gender != to.gender_key() || person.next_study.as_deref() != Some(to.study_key().as_str()) {
        return Err(MoveRejection::Mismatch);
    }

    if to.size() >= config.max_group_size {
        return Err(MoveRejection::TargetFull {
            max: config.max_group_size,
        });
    }

    if from.size() <= config.min_group_size {
        return Err(MoveRejection::SourceTooSmall {
            min: config.min_group_size,
        });
    }

    let common = find_common_slots(
        people
            .iter()
            .filter(|p| to.contains(&p.id))
            .chain(std::iter::once(person))
            .map(|p| &p.availability),
    );
    if common.is_empty() {
        return Err(MoveRejection::NoCommonAvailability);
    }

    Ok(common)
}

/// [`check_move`] in wire form.
pub fn validate_move(
    request: &MoveRequest,
    groups: &[Group],
    people: &[Person],
    config: &Config,
) -> MoveDecision {
    check_move(request, groups, people, config).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;
    use std::collections::BTreeMap;

    fn person(id: &str, gender: &str, study: &str, slots: &[&str]) -> Person {
        let availability: Availability = slots.iter().map(|s| (s.to_string(), true)).collect();
        Person {
            id: id.to_string(),
            first: id.to_string(),
            last: "X".to_string(),
            gender: gender.to_string(),
            email: String::new(),
            phone: String::new(),
            year: String::new(),
            program: String::new(),
            religion: String::new(),
            next_study: Some(study.to_string()),
            willing_to_lead: false,
            already_led: Vec::new(),
            availability,
        }
    }

    fn group(id: &str, gender: &str, study: &str, members: &[&str], stored: &[&str]) -> Group {
        Group {
            id: id.to_string(),
            faith_study: study.to_string(),
            gender: gender.to_string(),
            leader: None,
            members: members.iter().map(|s| s.to_string()).collect(),
            common_availabilities: stored.iter().map(|s| s.to_string()).collect(),
            member_details: BTreeMap::new(),
        }
    }

    /// g1 = [a, b, c] free Mon+Tue, g2 = [d, e] free Mon only.
    fn fixture() -> (Vec<Group>, Vec<Person>) {
        let people = vec![
            person("a", "female", "growth", &["Mon", "Tue"]),
            person("b", "female", "growth", &["Mon", "Tue"]),
            person("c", "female", "growth", &["Mon", "Tue"]),
            person("d", "female", "growth", &["Mon"]),
            person("e", "female", "growth", &["Mon", "Wed"]),
        ];
        let groups = vec![
            group("G1", "Female", "Growth", &["a", "b", "c"], &["Mon", "Tue"]),
            group("G2", "Female", "Growth", &["d", "e"], &["Mon"]),
        ];
        (groups, people)
    }

    #[test]
    fn test_valid_move_returns_recomputed_slots() {
        let (groups, people) = fixture();
        let config = Config::default();
        let result = check_move(&MoveRequest::new("a", "G1", "G2"), &groups, &people, &config);
        assert_eq!(result, Ok(vec!["Mon".to_string()]));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let (groups, people) = fixture();
        let config = Config::default();
        for request in [
            MoveRequest::new("zz", "G1", "G2"),
            MoveRequest::new("a", "G9", "G2"),
            MoveRequest::new("a", "G1", "G9"),
        ] {
            assert_eq!(
                check_move(&request, &groups, &people, &config),
                Err(MoveRejection::NotFound)
            );
        }
    }

    #[test]
    fn test_person_outside_source_group_is_not_found() {
        let (groups, people) = fixture();
        let config = Config::default();
        // d belongs to G2, not G1.
        assert_eq!(
            check_move(&MoveRequest::new("d", "G1", "G2"), &groups, &people, &config),
            Err(MoveRejection::NotFound)
        );
        // Same group on both sides.
        assert_eq!(
            check_move(&MoveRequest::new("a", "G1", "G1"), &groups, &people, &config),
            Err(MoveRejection::NotFound)
        );
    }

    #[test]
    fn test_gender_or_study_mismatch() {
        let (mut groups, mut people) = fixture();
        let config = Config::default();
        people.push(person("m", "male", "growth", &["Mon"]));
        people.push(person("s", "female", "source", &["Mon"]));
        groups[0].members.push("m".to_string());
        groups[0].members.push("s".to_string());

        assert_eq!(
            check_move(&MoveRequest::new("m", "G1", "G2"), &groups, &people, &config),
            Err(MoveRejection::Mismatch)
        );
        assert_eq!(
            check_move(&MoveRequest::new("s", "G1", "G2"), &groups, &people, &config),
            Err(MoveRejection::Mismatch)
        );
    }

    #[test]
    fn test_full_destination_rejected() {
        let (mut groups, people) = fixture();
        let config = Config::default();
        groups[1].members = ["d", "e", "x1", "x2", "x3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            check_move(&MoveRequest::new("a", "G1", "G2"), &groups, &people, &config),
            Err(MoveRejection::TargetFull { max: 5 })
        );
    }

    #[test]
    fn test_source_at_minimum_rejected() {
        let (groups, people) = fixture();
        let config = Config::default();
        assert_eq!(
            check_move(&MoveRequest::new("d", "G2", "G1"), &groups, &people, &config),
            Err(MoveRejection::SourceTooSmall { min: 2 })
        );
    }

    #[test]
    fn test_no_common_availability_ignores_stale_cache() {
        let (mut groups, mut people) = fixture();
        let config = Config::default();
        people.push(person("t", "female", "growth", &["Tue"]));
        groups[0].members.push("t".to_string());
        // Stored value claims Tue is shared; live membership says otherwise.
        groups[1].common_availabilities = vec!["Tue".to_string()];

        assert_eq!(
            check_move(&MoveRequest::new("t", "G1", "G2"), &groups, &people, &config),
            Err(MoveRejection::NoCommonAvailability)
        );
    }

    #[test]
    fn test_full_check_precedes_size_check() {
        let (mut groups, people) = fixture();
        let config = Config::default();
        groups[0].members.truncate(2);
        groups[1].members = ["d", "e", "x1", "x2", "x3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            check_move(&MoveRequest::new("a", "G1", "G2"), &groups, &people, &config),
            Err(MoveRejection::TargetFull { max: 5 })
        );
    }

    #[test]
    fn test_decision_wire_shape() {
        let ok = MoveDecision::from(Ok::<_, MoveRejection>(vec!["Mon".to_string()]));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"valid": true, "common_slots": ["Mon"]})
        );

        let rejected = MoveDecision::from(Err::<Vec<String>, _>(MoveRejection::SourceTooSmall { min: 2 }));
        assert_eq!(
            serde_json::to_value(&rejected).unwrap(),
            serde_json::json!({
                "valid": false,
                "reason": "Source group would be too small (min 2 people)"
            })
        );
    }

    #[test]
    fn test_validate_move_is_pure() {
        let (groups, people) = fixture();
        let config = Config::default();
        let before = groups.clone();
        let decision = validate_move(&MoveRequest::new("a", "G1", "G2"), &groups, &people, &config);
        assert!(decision.valid);
        assert_eq!(groups, before);
    }
}
