//! Subcommand handlers.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use studygroups_core::{
    plan_groups, read_roster, write_groups_csv, Config, Group, MoveDecision, MoveRequest, Session,
    SessionStore, StoredSession,
};

use crate::cli::{ConfigArgs, ExportArgs, MatchArgs, MoveArgs};
use crate::summary::{render_groups, render_outcome};

/// Config from `--config`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Session store from `--session`, or the cache directory.
pub fn open_store(path: Option<&Path>, config: &Config) -> Result<SessionStore> {
    match path {
        Some(path) => Ok(SessionStore::at(path.to_path_buf())),
        None => SessionStore::new(&config.cache_dir()?),
    }
}

pub fn run_match(args: &MatchArgs, config: &Config, store: &SessionStore) -> Result<()> {
    let table = read_roster(&args.roster)
        .with_context(|| format!("Failed to read roster: {}", args.roster.display()))?;
    debug!(rows = table.len(), "Roster read");

    let outcome = plan_groups(&table, config)?;
    print!("{}", render_outcome(&outcome));

    if let Some(export) = &args.export {
        write_export(export, &outcome.groups)?;
        println!("Exported {} groups to {}", outcome.groups.len(), export.display());
    }

    let stored = StoredSession::new(Session::from(outcome), Some(args.roster.clone()));
    store.save(&stored)?;
    info!(path = %store.path().display(), "Session saved");
    Ok(())
}

/// Validate a move and, when `apply` is set and it passes, save the result.
pub fn run_move(args: &MoveArgs, config: &Config, store: &SessionStore, apply: bool) -> Result<MoveDecision> {
    let mut stored = store.require()?;
    let request = MoveRequest::new(&args.person_id, &args.from_group_id, &args.to_group_id);

    let decision = if apply {
        stored.session.try_move(&request, config)
    } else {
        stored.session.check(&request, config)
    };

    println!("{}", serde_json::to_string_pretty(&decision)?);

    if apply && decision.valid {
        store.save(&StoredSession::new(stored.session, stored.source))?;
    }
    Ok(decision)
}

pub fn run_export(args: &ExportArgs, store: &SessionStore) -> Result<()> {
    let stored = store.require()?;
    write_export(&args.output, &stored.session.groups)?;
    println!(
        "Exported {} groups to {}",
        stored.session.groups.len(),
        args.output.display()
    );
    Ok(())
}

pub fn run_show(store: &SessionStore) -> Result<()> {
    let stored = store.require()?;
    print!("{}", render_groups(&stored.session.groups));
    match &stored.source {
        Some(source) => println!("\nFrom {} ({})", source.display(), stored.age_display()),
        None => println!("\nSaved {}", stored.age_display()),
    }
    Ok(())
}

pub fn run_config(args: &ConfigArgs, config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if args.save {
        config.save()?;
        info!("Config saved");
    }
    Ok(())
}

fn write_export(path: &Path, groups: &[Group]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_groups_csv(groups, BufWriter::new(file))
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    debug!(path = %path.display(), groups = groups.len(), "Groups exported");
    Ok(())
}
