use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// In-memory task tracker.
/// Tasks live only for the current session; --seed preloads them from a JSON file.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "In-memory task tracker with recurring tasks")]
pub struct Cli {
    /// JSON file of task records to load at start-up. Never written back.
    #[arg(long, global = true, env = "TODO_SEED")]
    pub seed: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "todo_tracker=trace".
    #[arg(long, global = true, env = "TODO_LOG", default_value = "warn")]
    pub log: String,

    /// Disable coloured output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, SortKey, Status};

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::try_parse_from([
            "todo", "--no-color", "list", "--status", "pending", "--priority", "high", "--sort", "title",
            "--limit", "3", "--json",
        ])
        .unwrap();
        assert!(cli.no_color);
        match cli.command {
            Some(Commands::List { status, priority, sort, limit, json, .. }) => {
                assert_eq!(status, Some(Status::Pending));
                assert_eq!(priority, Some(Priority::High));
                assert_eq!(sort, SortKey::Title);
                assert_eq!(limit, Some(3));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert!(Cli::try_parse_from(["todo", "list", "--priority", "urgent"]).is_err());
    }

    #[test]
    fn seed_flag_is_global() {
        let cli = Cli::try_parse_from(["todo", "list", "--seed", "tasks.json"]).unwrap();
        assert_eq!(cli.seed, Some(PathBuf::from("tasks.json")));
    }
}
