//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "studygroups",
    version,
    about = "Form small faith study groups from a survey roster",
    long_about = "Form small faith study groups from a survey roster.\n\n\
                  People are grouped by gender and next study, 2 to 5 per group,\n\
                  with at least one shared weekly time slot. Groups can then be\n\
                  adjusted by moving members and exported as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Matching configuration file (column labels, studies, weekdays).
    #[arg(long, value_name = "PATH", env = "STUDYGROUPS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Session file holding the current groups.
    #[arg(long, value_name = "PATH", env = "STUDYGROUPS_SESSION", global = true)]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a roster, form groups and save them as the current session.
    Match(MatchArgs),

    /// Move a person between groups in the current session.
    Move(MoveArgs),

    /// Check whether a move would be allowed without applying it.
    CheckMove(MoveArgs),

    /// Export the current session's groups as CSV.
    Export(ExportArgs),

    /// Show the groups in the current session.
    Show,

    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// Roster CSV exported from the sign-up survey.
    #[arg(value_name = "ROSTER")]
    pub roster: PathBuf,

    /// Also export the formed groups to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Person id, e.g. `Ada_Lovelace_3`.
    #[arg(value_name = "PERSON_ID")]
    pub person_id: String,

    /// Group the person is currently in.
    #[arg(value_name = "FROM")]
    pub from_group_id: String,

    /// Group to move the person into.
    #[arg(value_name = "TO")]
    pub to_group_id: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Destination CSV file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Also write it to the default config location.
    #[arg(long)]
    pub save: bool,
}
