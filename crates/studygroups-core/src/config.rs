//! Matching configuration management.
//!
//! This module holds the static vocabulary the engine works from: survey
//! column labels, the study progression, the weekday names that mark a slot
//! as free, and the group size bounds.
//!
//! Configuration is stored at `~/.config/studygroups/config.json`. Every key
//! is optional; anything missing falls back to the defaults below.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "studygroups";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default ordered study progression.
pub const DEFAULT_PROGRESSION: [&str; 5] = ["discovery", "source", "growth", "trust", "commission"];

/// Default day-name vocabulary for availability text.
pub const DEFAULT_WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Smallest group the matcher forms and a move may leave behind.
pub const MIN_GROUP_SIZE: usize = 2;

/// Largest group the matcher forms and a move may fill.
pub const MAX_GROUP_SIZE: usize = 5;

/// Combinations examined per (bucket, size) before that size is abandoned.
/// C(40, 5) is just over 650k, so survey-sized buckets never get close.
const DEFAULT_SEARCH_LIMIT: usize = 2_000_000;

/// Survey column labels the normalizer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub completed_studies: String,
    pub willing_to_lead: String,
    pub studies_led: String,
    pub email: String,
    pub phone: String,
    pub year: String,
    pub program: String,
    pub religion: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            first_name: "First Name".to_string(),
            last_name: "Last Name".to_string(),
            gender: "Please indicate your gender.".to_string(),
            completed_studies: "Please indicate which faith studies you've completed.".to_string(),
            willing_to_lead: "Are you willing to lead a Faith Study?".to_string(),
            studies_led: "Please indicate which faith studies you have led:".to_string(),
            email: "E-mail Address".to_string(),
            phone: "Cell Phone Number".to_string(),
            year: "What year of study are you currently in?".to_string(),
            program: "What is your program of study?".to_string(),
            religion: "Which religion/faith do you most identify with?".to_string(),
        }
    }
}

impl ColumnLabels {
    /// Labels that must be present before a roster is processed.
    pub fn required(&self) -> [&str; 5] {
        [
            &self.first_name,
            &self.last_name,
            &self.gender,
            &self.completed_studies,
            &self.willing_to_lead,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnLabels,
    /// Ordered studies a person works through, lowercase.
    pub progression: Vec<String>,
    /// Day names that mark an availability value as free, lowercase.
    pub weekdays: Vec<String>,
    /// Label substrings identifying availability columns when the
    /// studies-led anchor column is absent.
    pub slot_markers: Vec<String>,
    pub min_group_size: usize,
    pub max_group_size: usize,
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: ColumnLabels::default(),
            progression: DEFAULT_PROGRESSION.iter().map(|s| s.to_string()).collect(),
            weekdays: DEFAULT_WEEKDAYS.iter().map(|s| s.to_string()).collect(),
            slot_markers: vec!["timeslot".to_string()],
            min_group_size: MIN_GROUP_SIZE,
            max_group_size: MAX_GROUP_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        let config = config.normalized();
        config
            .check_group_sizes()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Group sizes must stay within `MIN_GROUP_SIZE..=MAX_GROUP_SIZE`.
    pub fn check_group_sizes(&self) -> Result<()> {
        anyhow::ensure!(
            MIN_GROUP_SIZE <= self.min_group_size
                && self.min_group_size <= self.max_group_size
                && self.max_group_size <= MAX_GROUP_SIZE,
            "Group sizes must satisfy {} <= min_group_size <= max_group_size <= {} (got min {}, max {})",
            MIN_GROUP_SIZE,
            MAX_GROUP_SIZE,
            self.min_group_size,
            self.max_group_size
        );
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Lowercase and trim the vocabulary lists so hand-edited files
    /// compare the same way as the defaults.
    fn normalized(mut self) -> Self {
        let clean = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };
        self.progression = clean(self.progression);
        self.weekdays = clean(self.weekdays);
        self.slot_markers = clean(self.slot_markers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_progression_order() {
        let config = Config::default();
        assert_eq!(
            config.progression,
            vec!["discovery", "source", "growth", "trust", "commission"]
        );
        assert_eq!(config.min_group_size, 2);
        assert_eq!(config.max_group_size, 5);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_group_size": 4}"#).unwrap();
        assert_eq!(config.max_group_size, 4);
        assert_eq!(config.weekdays.len(), 7);
        assert_eq!(config.columns.first_name, "First Name");
    }

    #[test]
    fn test_load_from_normalizes_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"progression": [" Alpha ", "BETA", ""]}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.progression, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_load_from_rejects_group_sizes_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        for body in [
            r#"{"max_group_size": 6}"#,
            r#"{"min_group_size": 1}"#,
            r#"{"min_group_size": 4, "max_group_size": 3}"#,
        ] {
            std::fs::write(&path, body).unwrap();
            let err = Config::load_from(&path).unwrap_err();
            assert!(format!("{:#}", err).contains("Group sizes must satisfy"), "{body}");
        }

        std::fs::write(&path, r#"{"min_group_size": 3, "max_group_size": 4}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!((config.min_group_size, config.max_group_size), (3, 4));
    }

    #[test]
    fn test_required_columns() {
        let labels = ColumnLabels::default();
        let required = labels.required();
        assert_eq!(required[0], "First Name");
        assert_eq!(required[4], "Are you willing to lead a Faith Study?");
    }
}
