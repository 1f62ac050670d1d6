use serde::{Deserialize, Serialize};

use super::availability::Availability;

/// A normalized survey respondent.
///
/// Built once per roster row by the normalizer. Contact fields are carried
/// for display and export only; matching looks at `gender`, `next_study`,
/// `willing_to_lead`, `already_led` and `availability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Person {
    /// `<first>_<last>_<row ordinal>`, unique within a roster even for
    /// duplicate names.
    pub id: String,
    pub first: String,
    pub last: String,
    /// Trimmed and lowercased. Empty means the person is never grouped.
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub religion: String,
    /// First study in the progression not yet completed; `None` once all
    /// are done.
    pub next_study: Option<String>,
    #[serde(default)]
    pub willing_to_lead: bool,
    /// Studies previously led, lowercase.
    #[serde(default)]
    pub already_led: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    /// Has a gender and still has a study to take.
    pub fn is_eligible(&self) -> bool {
        !self.gender.trim().is_empty() && self.next_study.is_some()
    }

    pub fn has_led(&self, study: &str) -> bool {
        let study = study.trim().to_lowercase();
        self.already_led.iter().any(|led| *led == study)
    }

    /// Willing to lead and has not already led `study`.
    pub fn can_lead(&self, study: &str) -> bool {
        self.willing_to_lead && !self.has_led(study)
    }

    pub fn is_free(&self, slot: &str) -> bool {
        self.availability.get(slot).copied().unwrap_or(false)
    }
}

/// A soft problem found while normalizing one roster row.
///
/// Warnings never stop a batch; the person is still created and is simply
/// left out of grouping when the problem makes them ineligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWarning {
    /// The column exists but this row has no value, or the column is absent.
    MissingField { label: String },
    BlankGender,
    /// A completed-study entry that is not part of the progression.
    UnknownStudy { value: String },
    AllStudiesCompleted,
}

impl std::fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldWarning::MissingField { label } => write!(f, "missing value for '{}'", label),
            FieldWarning::BlankGender => write!(f, "blank gender"),
            FieldWarning::UnknownStudy { value } => write!(f, "unrecognized study '{}'", value),
            FieldWarning::AllStudiesCompleted => write!(f, "all studies completed"),
        }
    }
}

impl FieldWarning {
    /// Whether this warning keeps the person out of grouping.
    pub fn excludes(&self) -> bool {
        matches!(self, FieldWarning::BlankGender | FieldWarning::AllStudiesCompleted)
    }
}
