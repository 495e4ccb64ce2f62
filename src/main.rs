//! # todo - in-memory task tracker
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive menu (the default)
//! todo
//!
//! # Start with tasks loaded from a JSON file
//! todo --seed tasks.json
//!
//! # Print high-priority pending tasks as JSON
//! todo --seed tasks.json list --status pending --priority high --json
//! ```
//!
//! Tasks are kept in memory only. A seed file is read once at start-up and is
//! never written back.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_tracker::cli::Cli;
use todo_tracker::cmd::*;
use todo_tracker::display::Painter;
use todo_tracker::query::TaskFilter;
use todo_tracker::service::TaskService;

fn init_logging(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive).with_context(|| format!("invalid log filter '{directive}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log)?;
    let painter = Painter::new(!cli.no_color);

    let mut service = TaskService::new();
    if let Some(ref path) = cli.seed {
        let count = import_seed(&mut service, path)?;
        info!(count, path = %path.display(), "seed loaded");
    }

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(service, painter),

        Commands::List { status, priority, category, search, sort, limit, json } => {
            let mut filter = TaskFilter { status, priority, category: None };
            if let Some(c) = category {
                filter.set_category(&c);
            }
            let opts = ListOptions { search, filter, sort, limit, json };
            cmd_list(&service, &opts, painter, &mut io::stdout().lock())
        }

        Commands::Completions { shell } => {
            cmd_completions(shell, &mut io::stdout());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
