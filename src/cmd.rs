//! Command implementations for the CLI interface.
//!
//! Each subcommand has a `cmd_*` handler. Handlers take the service by
//! reference and an output stream, and return `anyhow::Result` so `main`
//! decides how failures are reported.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::display::{today, write_task_table, Painter};
use crate::fields::{Priority, SortKey, Status};
use crate::menu::Menu;
use crate::query::{self, TaskFilter};
use crate::service::TaskService;
use crate::task::{SeedRecord, Task};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive menu (default).
    Menu,

    /// Print tasks with optional search, filters and ordering.
    List {
        /// Filter by completion status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Filter by category (case-insensitive substring).
        #[arg(long)]
        category: Option<String>,
        /// Keep tasks whose title or description contains this keyword.
        #[arg(long)]
        search: Option<String>,
        /// Sort key.
        #[arg(long, value_enum, default_value_t = SortKey::Id)]
        sort: SortKey,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for [`cmd_list`], in the order they are applied.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub filter: TaskFilter,
    pub sort: SortKey,
    pub limit: Option<usize>,
    pub json: bool,
}

/// Read a JSON array of task records.
pub fn load_seed(path: &Path) -> Result<Vec<SeedRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read seed file {}", path.display()))?;
    let records: Vec<SeedRecord> =
        serde_json::from_str(&text).with_context(|| format!("failed to parse seed file {}", path.display()))?;
    debug!(path = %path.display(), count = records.len(), "seed file parsed");
    Ok(records)
}

/// Load a seed file into the service; nothing is added if any record is invalid.
pub fn import_seed(service: &mut TaskService, path: &Path) -> Result<usize> {
    let records = load_seed(path)?;
    service
        .import(records)
        .with_context(|| format!("invalid task record in {}", path.display()))
}

/// Run the interactive menu on stdin and stdout.
pub fn cmd_menu(service: TaskService, painter: Painter) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(service, stdin.lock(), stdout.lock(), painter);
    menu.run().context("menu session failed")
}

/// Search, then filter, then sort, then limit.
pub fn select_tasks(service: &TaskService, opts: &ListOptions) -> Result<Vec<Task>> {
    let mut tasks = match opts.search {
        Some(ref keyword) => service.search_tasks(keyword)?,
        None => service.get_all_tasks(),
    };
    tasks = query::filter(&tasks, &opts.filter);
    tasks = query::sort(&tasks, opts.sort);
    if let Some(n) = opts.limit {
        tasks.truncate(n);
    }
    Ok(tasks)
}

pub fn cmd_list<W: Write>(service: &TaskService, opts: &ListOptions, painter: Painter, out: &mut W) -> Result<()> {
    let tasks = select_tasks(service, opts)?;

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &tasks).context("failed to serialise tasks")?;
        writeln!(out)?;
        return Ok(());
    }

    if tasks.is_empty() {
        if service.has_tasks() {
            writeln!(out, "No tasks match the given criteria.")?;
        } else {
            writeln!(out, "No tasks found.")?;
        }
        return Ok(());
    }
    write_task_table(out, &tasks, today(), painter)?;
    Ok(())
}

pub fn cmd_completions<W: Write>(shell: Shell, out: &mut W) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskInput;

    fn service() -> TaskService {
        let mut service = TaskService::new();
        for input in [
            TaskInput::new("Write report").priority("low").category("Work"),
            TaskInput::new("buy milk").priority("high").category("Home"),
            TaskInput::new("Report bug").priority("high").category("Work"),
            TaskInput::new("Call mom"),
        ] {
            service.add_task(input).unwrap();
        }
        service
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn default_options_list_everything_by_id() {
        let tasks = select_tasks(&service(), &ListOptions::default()).unwrap();
        assert_eq!(ids(&tasks), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_filter_sort_limit_chain() {
        let opts = ListOptions {
            search: Some("report".into()),
            filter: TaskFilter { category: Some("work".into()), ..Default::default() },
            sort: SortKey::Priority,
            limit: Some(1),
            json: false,
        };
        assert_eq!(ids(&select_tasks(&service(), &opts).unwrap()), vec![3]);
    }

    #[test]
    fn blank_search_is_an_error() {
        let opts = ListOptions { search: Some(" ".into()), ..Default::default() };
        assert!(select_tasks(&service(), &opts).is_err());
    }

    #[test]
    fn json_output_uses_lowercase_names() {
        let opts = ListOptions { limit: Some(1), json: true, ..Default::default() };
        let mut buf = Vec::new();
        cmd_list(&service(), &opts, Painter::new(false), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["title"], "Write report");
        assert_eq!(value[0]["priority"], "low");
        assert_eq!(value[0]["recurrence"], "none");
    }

    #[test]
    fn empty_store_message() {
        let mut buf = Vec::new();
        cmd_list(&TaskService::new(), &ListOptions::default(), Painter::new(false), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No tasks found.\n");
    }

    #[test]
    fn load_seed_reports_missing_file() {
        let err = load_seed(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read seed file"));
    }
}
