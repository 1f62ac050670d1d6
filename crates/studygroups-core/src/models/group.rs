use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::person::Person;

/// Contact details shown alongside a group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MemberDetail {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub program: String,
}

impl From<&Person> for MemberDetail {
    fn from(person: &Person) -> Self {
        Self {
            name: person.full_name(),
            email: person.email.clone(),
            phone: person.phone.clone(),
            year: person.year.clone(),
            program: person.program.clone(),
        }
    }
}

/// A formed study group.
///
/// `faith_study` and `gender` hold the capitalized display form of the
/// bucket key. `common_availabilities` is a cache of the live intersection
/// and is recomputed whenever membership changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Group {
    pub id: String,
    pub faith_study: String,
    pub gender: String,
    pub leader: Option<String>,
    pub members: Vec<String>,
    #[serde(default)]
    pub common_availabilities: Vec<String>,
    #[serde(default)]
    pub member_details: BTreeMap<String, MemberDetail>,
}

impl Group {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.members.iter().any(|m| m == person_id)
    }

    /// Lowercase study key for comparisons with `Person::next_study`.
    pub fn study_key(&self) -> String {
        self.faith_study.trim().to_lowercase()
    }

    /// Lowercase gender key for comparisons with `Person::gender`.
    pub fn gender_key(&self) -> String {
        self.gender.trim().to_lowercase()
    }

    /// Display name of the leader: `None` when unset, `Some("Unknown")`
    /// when the leader has no detail entry.
    pub fn leader_name(&self) -> Option<&str> {
        self.leader.as_ref().map(|id| {
            self.member_details
                .get(id)
                .map(|d| d.name.as_str())
                .unwrap_or("Unknown")
        })
    }

    /// Member display names in member order, skipping ids without details.
    pub fn member_names(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter_map(|id| self.member_details.get(id).map(|d| d.name.as_str()))
            .collect()
    }
}
