//! Data models for the study group engine.
//!
//! - `Person`: one normalized survey respondent
//! - `FieldWarning`: soft per-row problems found while normalizing
//! - `Group`, `MemberDetail`: a formed study group and its display data
//! - `Availability`: slot label to "free on this slot"

pub mod availability;
pub mod group;
pub mod person;

pub use availability::{find_common_slots, names_weekday, Availability};
pub use group::{Group, MemberDetail};
pub use person::{FieldWarning, Person};
