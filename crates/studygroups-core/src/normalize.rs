//! Cohort normalizer.
//!
//! Converts roster rows into [`Person`] records. This never fails: a blank
//! or missing cell becomes an empty string plus a [`FieldWarning`], and the
//! matcher later skips anyone left without a gender or a next study.

use tracing::debug;

use crate::config::Config;
use crate::ingest::{RosterTable, Row};
use crate::models::{names_weekday, Availability, FieldWarning, Person};
use crate::utils::parse_list;

/// First study in `progression` missing from the comma-separated
/// `completed` text. Blank text yields the first study; `None` means every
/// study is done.
pub fn next_study<'p>(completed: &str, progression: &'p [String]) -> Option<&'p str> {
    let done = parse_list(completed);
    progression
        .iter()
        .find(|study| !done.iter().any(|d| d == *study))
        .map(String::as_str)
}

/// Whether the comma-separated `led_text` lists `study`. Blank text is false.
pub fn has_led(study: &str, led_text: &str) -> bool {
    let study = study.trim().to_lowercase();
    parse_list(led_text).iter().any(|led| *led == study)
}

/// One normalized row and the soft problems found in it.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub person: Person,
    pub warnings: Vec<FieldWarning>,
}

/// Every person in a roster, with warnings keyed by person id.
#[derive(Debug, Clone, Default)]
pub struct Cohort {
    pub people: Vec<Person>,
    pub warnings: Vec<(String, FieldWarning)>,
}

impl Cohort {
    pub fn eligible_count(&self) -> usize {
        self.people.iter().filter(|p| p.is_eligible()).count()
    }
}

pub struct Normalizer<'c> {
    config: &'c Config,
}

impl<'c> Normalizer<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Column positions holding availability answers.
    ///
    /// Normally every column after the studies-led column. When that column
    /// is absent, any label containing a slot marker or a `[...]` pair.
    pub fn availability_columns(&self, headers: &[String]) -> Vec<usize> {
        let anchor = &self.config.columns.studies_led;
        if let Some(index) = headers.iter().position(|h| h == anchor) {
            return (index + 1..headers.len()).collect();
        }

        debug!("Studies-led column not found, matching availability columns by label");
        headers
            .iter()
            .enumerate()
            .filter(|(_, label)| self.is_slot_label(label))
            .map(|(i, _)| i)
            .collect()
    }

    fn is_slot_label(&self, label: &str) -> bool {
        let lower = label.to_lowercase();
        let marked = self
            .config
            .slot_markers
            .iter()
            .any(|marker| lower.contains(marker.as_str()));
        marked || (label.contains('[') && label.contains(']'))
    }

    pub fn next_study(&self, completed: &str) -> Option<String> {
        next_study(completed, &self.config.progression).map(str::to_string)
    }

    /// Normalize one row. `ordinal` is the row's position in the roster and
    /// keeps ids unique when two people share a name.
    pub fn normalize_row(&self, ordinal: usize, row: Row<'_>, slot_columns: &[usize]) -> NormalizedRow {
        let cols = &self.config.columns;
        let mut warnings = Vec::new();

        let mut required = |label: &str| -> String {
            let value = row.get(label);
            if value.trim().is_empty() {
                warnings.push(FieldWarning::MissingField {
                    label: label.to_string(),
                });
            }
            value.to_string()
        };

        let first = required(&cols.first_name);
        let last = required(&cols.last_name);
        let completed = required(&cols.completed_studies);
        let willing = required(&cols.willing_to_lead);

        let gender = row.get(&cols.gender).trim().to_lowercase();
        if gender.is_empty() {
            warnings.push(FieldWarning::BlankGender);
        }

        for entry in parse_list(&completed) {
            if !self.config.progression.contains(&entry) {
                warnings.push(FieldWarning::UnknownStudy { value: entry });
            }
        }
        let next_study = self.next_study(&completed);
        if next_study.is_none() {
            warnings.push(FieldWarning::AllStudiesCompleted);
        }

        let availability: Availability = slot_columns
            .iter()
            .filter_map(|&i| row.at(i))
            .map(|(label, value)| (label.to_string(), names_weekday(value, &self.config.weekdays)))
            .collect();

        let person = Person {
            id: format!("{}_{}_{}", first, last, ordinal),
            first,
            last,
            gender,
            email: row.get(&cols.email).to_string(),
            phone: row.get(&cols.phone).to_string(),
            year: row.get(&cols.year).to_string(),
            program: row.get(&cols.program).to_string(),
            religion: row.get(&cols.religion).to_string(),
            next_study,
            willing_to_lead: willing.trim().eq_ignore_ascii_case("yes"),
            already_led: parse_list(row.get(&cols.studies_led)),
            availability,
        };

        NormalizedRow { person, warnings }
    }

    /// Normalize every row of `table`, in order.
    pub fn normalize(&self, table: &RosterTable) -> Cohort {
        let slot_columns = self.availability_columns(table.headers());
        debug!(slots = slot_columns.len(), rows = table.len(), "Normalizing roster");

        let mut cohort = Cohort::default();
        for (ordinal, row) in table.rows().enumerate() {
            let NormalizedRow { person, warnings } = self.normalize_row(ordinal, row, &slot_columns);
            for warning in warnings {
                debug!(person = %person.id, %warning, "Row warning");
                cohort.warnings.push((person.id.clone(), warning));
            }
            cohort.people.push(person);
        }

        debug!(
            people = cohort.people.len(),
            eligible = cohort.eligible_count(),
            warnings = cohort.warnings.len(),
            "Roster normalized"
        );
        cohort
    }
}
