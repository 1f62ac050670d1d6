//! studygroups - form faith study groups from a survey roster.
//!
//! Reads a sign-up roster, forms groups and keeps them as a session in the
//! cache directory so later invocations can move members and export.

mod cli;
mod commands;
mod summary;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command};

/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` controls the level unless `-v` is given. Logs go to stderr, or
/// to `log_file` when set; the returned guard must live until exit so the
/// file writer flushes.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            Ok(None)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;
    let store = || commands::open_store(cli.session.as_deref(), &config);

    match &cli.command {
        Command::Match(args) => commands::run_match(args, &config, &store()?),
        Command::Move(args) => commands::run_move(args, &config, &store()?, true).map(|_| ()),
        Command::CheckMove(args) => commands::run_move(args, &config, &store()?, false).map(|_| ()),
        Command::Export(args) => commands::run_export(args, &store()?),
        Command::Show => commands::run_show(&store()?),
        Command::Config(args) => commands::run_config(args, &config),
    }
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = match init_tracing(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(version = env!("CARGO_PKG_VERSION"), "studygroups starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
