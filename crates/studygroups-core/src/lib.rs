//! Core library for studygroups.
//!
//! Forms small faith study groups from survey sign-up data:
//!
//! - [`ingest`]: read a roster export into a [`RosterTable`]
//! - [`normalize`]: turn rows into [`Person`] records (next study,
//!   leadership, weekday-based availability)
//! - [`matcher`]: bucket people by gender and next study and form at most
//!   one group per bucket
//! - [`validate`]: decide whether a manual move between groups keeps both
//!   groups valid
//! - [`session`], [`store`], [`export`]: the caller-side snapshot, its
//!   persistence, and CSV export

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod session;
pub mod store;
pub mod utils;
pub mod validate;

pub use config::{ColumnLabels, Config};
pub use error::{Result, RosterError};
pub use export::{export_rows, write_groups_csv, ExportRow};
pub use ingest::{read_roster, RosterTable, Row};
pub use matcher::{GroupMatcher, MatchOutcome};
pub use models::{find_common_slots, Availability, FieldWarning, Group, MemberDetail, Person};
pub use normalize::{has_led, next_study, Cohort, Normalizer};
pub use pipeline::plan_groups;
pub use session::Session;
pub use store::{SessionStore, StoredSession};
pub use validate::{check_move, validate_move, MoveDecision, MoveRejection, MoveRequest};
