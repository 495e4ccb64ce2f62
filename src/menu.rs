//! Interactive text menu.
//!
//! A line-oriented front end over [`TaskService`]. Input and output streams
//! are injected so whole sessions can be scripted. End of input at any prompt
//! ends the session.

use std::io::{self, BufRead, Write};

use crossterm::style::Color;

use crate::display::{format_due_date, today, write_task_detail, write_task_table, Painter};
use crate::fields::Status;
use crate::query;
use crate::service::TaskService;
use crate::task::{Task, TaskInput, TaskUpdate};
use crate::validate::validate_priority;

const MAIN_OPTIONS: [&str; 9] = [
    "Add Task",
    "View Tasks",
    "Update Task",
    "Delete Task",
    "Mark as Completed",
    "Search Tasks",
    "Filter Tasks",
    "Sort Tasks",
    "Exit",
];

/// Whether the main loop keeps going after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Unwrap a prompt answer, ending the session on end of input.
macro_rules! answer {
    ($e:expr) => {
        match $e? {
            Some(line) => line,
            None => return Ok(Flow::Exit),
        }
    };
}

/// Text menu session state.
pub struct Menu<R, W> {
    service: TaskService,
    input: R,
    out: W,
    painter: Painter,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(service: TaskService, input: R, out: W, painter: Painter) -> Self {
        Self {
            service,
            input,
            out,
            painter,
        }
    }

    /// Hand back the service and output stream once the session is over.
    pub fn into_parts(self) -> (TaskService, W) {
        (self.service, self.out)
    }

    /// Run the main loop until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.banner("WELCOME TO TODO APPLICATION", "In-Memory Console Version")?;
        loop {
            self.show_main_menu()?;
            let flow = match self.read_choice(MAIN_OPTIONS.len())? {
                None => Flow::Exit,
                Some(1) => self.handle_add()?,
                Some(2) => self.handle_view()?,
                Some(3) => self.handle_update()?,
                Some(4) => self.handle_delete()?,
                Some(5) => self.handle_toggle()?,
                Some(6) => self.handle_search()?,
                Some(7) => self.handle_filter()?,
                Some(8) => self.handle_sort()?,
                Some(_) => self.handle_exit()?,
            };
            if flow == Flow::Exit {
                break;
            }
        }
        self.banner("Thank you for using Todo Application!", "Goodbye!")
    }

    // Output helpers.

    fn banner(&mut self, title: &str, subtitle: &str) -> io::Result<()> {
        let rule = "=".repeat(80);
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{:^80}", title)?;
        writeln!(self.out, "{:^80}", subtitle)?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out)
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        writeln!(self.out, "{:^40}", title)?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        writeln!(self.out)
    }

    fn show_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Please select an option:")?;
        writeln!(self.out)?;
        for (i, label) in MAIN_OPTIONS.iter().enumerate() {
            writeln!(self.out, "  [{}] {label}", i + 1)?;
        }
        writeln!(self.out)
    }

    fn success(&mut self, msg: &str) -> io::Result<()> {
        let line = self.painter.paint(&format!("SUCCESS: {msg}"), Color::Green);
        writeln!(self.out, "\n  {line}\n")
    }

    fn error(&mut self, msg: &str) -> io::Result<()> {
        let line = self.painter.paint(&format!("ERROR: {msg}"), Color::Red);
        writeln!(self.out, "\n  {line}\n")
    }

    fn show_tasks(&mut self, tasks: &[Task]) -> io::Result<()> {
        write_task_table(&mut self.out, tasks, today(), self.painter)
    }

    fn show_task(&mut self, task: &Task) -> io::Result<()> {
        write_task_detail(&mut self.out, task, today(), self.painter)
    }

    // Input helpers.

    /// Print `msg` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_choice(&mut self, max: usize) -> io::Result<Option<usize>> {
        loop {
            let Some(text) = self.prompt(&format!("Enter your choice (1-{max}): "))? else {
                return Ok(None);
            };
            match text.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
                _ => self.error(&format!("Please enter a number between 1 and {max}"))?,
            }
        }
    }

    fn read_task_id(&mut self, msg: &str) -> io::Result<Option<u64>> {
        loop {
            let Some(text) = self.prompt(msg)? else {
                return Ok(None);
            };
            match text.parse::<u64>() {
                Ok(n) if n > 0 => return Ok(Some(n)),
                Ok(_) => self.error("Invalid ID. Please enter a positive number")?,
                Err(_) => self.error("Invalid ID. Please enter a number")?,
            }
        }
    }

    fn confirm(&mut self, msg: &str) -> io::Result<Option<bool>> {
        Ok(self.prompt(msg)?.map(|a| a.eq_ignore_ascii_case("y")))
    }

    // Handlers.

    fn handle_add(&mut self) -> io::Result<Flow> {
        self.heading("ADD NEW TASK")?;
        loop {
            let description = answer!(self.prompt("Enter description (optional, press Enter to skip): "));
            let priority = answer!(self.prompt("Enter priority (high/medium/low, default: medium): "));
            let category = answer!(self.prompt("Enter category (optional, press Enter to skip): "));
            let due_date = answer!(self.prompt("Enter due date (YYYY-MM-DD, optional, press Enter to skip): "));
            let recurrence = answer!(self.prompt("Enter recurrence (none/daily/weekly/monthly, default: none): "));
            let title = answer!(self.prompt("Enter task title: "));

            let mut input = TaskInput::new(title)
                .description(description)
                .category(category)
                .due_date(due_date);
            if !priority.is_empty() {
                input = input.priority(priority);
            }
            if !recurrence.is_empty() {
                input = input.recurrence(recurrence);
            }

            match self.service.add_task(input) {
                Ok(task) => {
                    self.success(&format!("Task #{} created successfully!", task.id))?;
                    self.show_task(&task)?;
                    return Ok(Flow::Continue);
                }
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    fn handle_view(&mut self) -> io::Result<Flow> {
        writeln!(self.out)?;
        let tasks = self.service.filtered_tasks();
        if tasks.is_empty() {
            if self.service.filters().is_active() && self.service.has_tasks() {
                writeln!(self.out, "  No tasks match current filters")?;
            } else {
                writeln!(self.out, "  No tasks found. Add a task to get started!")?;
            }
            return Ok(Flow::Continue);
        }
        self.show_tasks(&tasks)?;
        Ok(Flow::Continue)
    }

    fn handle_update(&mut self) -> io::Result<Flow> {
        self.heading("UPDATE TASK")?;
        if !self.service.has_tasks() {
            self.error("No tasks available to update")?;
            return Ok(Flow::Continue);
        }
        let Some(id) = self.read_task_id("Enter task ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(task) = self.service.get_task(id) else {
            self.error(&format!("Task with ID {id} not found"))?;
            return Ok(Flow::Continue);
        };

        writeln!(self.out, "\nCurrent task details:")?;
        self.show_task(&task)?;
        writeln!(self.out, "\nPress Enter to keep a value; enter '-' to clear category or due date.\n")?;

        let keep = |text: String| (!text.is_empty()).then_some(text);
        let clearable = |text: String| match text.as_str() {
            "" => None,
            "-" => Some(String::new()),
            _ => Some(text),
        };

        let title = answer!(self.prompt(&format!("New title [{}]: ", task.title)));
        let description = answer!(self.prompt("New description: "));
        let priority = answer!(self.prompt(&format!("New priority [{}]: ", task.priority.as_str())));
        let category = answer!(self.prompt(&format!(
            "New category [{}]: ",
            task.category.as_deref().unwrap_or("none")
        )));
        let due_date = answer!(self.prompt(&format!(
            "New due date YYYY-MM-DD [{}]: ",
            format_due_date(task.due_date, today())
        )));
        let recurrence = answer!(self.prompt(&format!("New recurrence [{}]: ", task.recurrence.as_str())));

        let update = TaskUpdate {
            title: keep(title),
            description: keep(description),
            priority: keep(priority),
            category: clearable(category),
            due_date: clearable(due_date),
            recurrence: keep(recurrence),
        };
        if update.is_empty() {
            writeln!(self.out, "\n  Nothing to update.\n")?;
            return Ok(Flow::Continue);
        }

        match self.service.update_task(id, update) {
            Ok(updated) => {
                self.success(&format!("Task #{id} updated successfully!"))?;
                self.show_task(&updated)?;
            }
            Err(e) => self.error(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    fn handle_delete(&mut self) -> io::Result<Flow> {
        self.heading("DELETE TASK")?;
        if !self.service.has_tasks() {
            self.error("No tasks available to delete")?;
            return Ok(Flow::Continue);
        }
        let Some(id) = self.read_task_id("Enter task ID to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(task) = self.service.get_task(id) else {
            self.error(&format!("Task with ID {id} not found"))?;
            return Ok(Flow::Continue);
        };

        writeln!(self.out, "\nTask to be deleted:")?;
        self.show_task(&task)?;
        writeln!(self.out)?;

        match self.confirm("Are you sure you want to delete this task? (y/n): ")? {
            None => Ok(Flow::Exit),
            Some(true) => {
                if self.service.delete_task(id) {
                    self.success(&format!("Task #{id} deleted successfully!"))?;
                } else {
                    self.error("Failed to delete task")?;
                }
                Ok(Flow::Continue)
            }
            Some(false) => {
                writeln!(self.out, "\n  Deletion cancelled.\n")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_toggle(&mut self) -> io::Result<Flow> {
        self.heading("TOGGLE TASK STATUS")?;
        if !self.service.has_tasks() {
            self.error("No tasks available")?;
            return Ok(Flow::Continue);
        }
        let Some(id) = self.read_task_id("Enter task ID to mark as completed: ")? else {
            return Ok(Flow::Exit);
        };

        let toggled = match self.service.toggle_task(id) {
            Ok(t) => t,
            Err(e) => {
                self.error(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        };
        let state = if toggled.task.is_completed { "complete" } else { "incomplete" };
        self.success(&format!("Task #{id} marked as {state}"))?;

        if let Some(next) = toggled.next_occurrence {
            let rule = "=".repeat(60);
            writeln!(self.out, "{rule}")?;
            writeln!(self.out, "  Next occurrence created automatically!")?;
            writeln!(self.out, "{rule}")?;
            writeln!(self.out, "  New Task ID:       {}", next.id)?;
            if let Some(parent) = next.parent_task_id {
                writeln!(self.out, "  Parent Task ID:    {parent}")?;
            }
            writeln!(self.out, "  Next Due Date:     {}", format_due_date(next.due_date, today()))?;
            writeln!(self.out, "  Recurrence:        {}", next.recurrence)?;
            writeln!(self.out, "{rule}")?;
        }
        Ok(Flow::Continue)
    }

    fn handle_search(&mut self) -> io::Result<Flow> {
        self.heading("SEARCH TASKS")?;
        if !self.service.has_tasks() {
            self.error("No tasks available to search")?;
            return Ok(Flow::Continue);
        }
        let keyword = loop {
            let text = answer!(self.prompt("Enter keyword to search: "));
            if !text.is_empty() {
                break text;
            }
            self.error("Keyword cannot be empty")?;
        };

        match self.service.search_tasks(&keyword) {
            Ok(results) if results.is_empty() => {
                writeln!(self.out, "\nNo tasks found matching '{keyword}'")?;
            }
            Ok(results) => {
                let n = results.len();
                writeln!(self.out, "\nSearch Results: {n} task{} found", if n == 1 { "" } else { "s" })?;
                self.show_tasks(&results)?;
            }
            Err(e) => self.error(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    fn handle_filter(&mut self) -> io::Result<Flow> {
        self.heading("FILTER TASKS")?;
        if !self.service.has_tasks() {
            self.error("No tasks available to filter")?;
            return Ok(Flow::Continue);
        }

        loop {
            writeln!(self.out, "\nAvailable filters:")?;
            writeln!(self.out, "  [1] By Status (pending/completed)")?;
            writeln!(self.out, "  [2] By Priority (high/medium/low)")?;
            writeln!(self.out, "  [3] By Category")?;
            writeln!(self.out, "  [4] Clear All Filters")?;
            writeln!(self.out, "  [5] Back to Main Menu")?;
            writeln!(self.out, "\nActive filters: {}", self.service.filters())?;

            let Some(choice) = self.read_choice(5)? else {
                return Ok(Flow::Exit);
            };
            match choice {
                1 => loop {
                    let text = answer!(self.prompt("Enter status (pending/completed, or 'all' to clear): "));
                    let status = match text.to_lowercase().as_str() {
                        "pending" => Some(Status::Pending),
                        "completed" => Some(Status::Completed),
                        "all" => None,
                        _ => {
                            self.error("Invalid status. Must be 'pending', 'completed', or 'all'")?;
                            continue;
                        }
                    };
                    self.service.filters_mut().status = status;
                    break;
                },
                2 => loop {
                    let text = answer!(self.prompt("Enter priority (high/medium/low, or 'all' to clear): "));
                    if text.eq_ignore_ascii_case("all") {
                        self.service.filters_mut().priority = None;
                        break;
                    }
                    match validate_priority(&text) {
                        Ok(p) => {
                            self.service.filters_mut().priority = Some(p);
                            break;
                        }
                        Err(e) => self.error(&e.to_string())?,
                    }
                },
                3 => {
                    let text = answer!(self.prompt("Enter category (or 'all' to clear): "));
                    if text.eq_ignore_ascii_case("all") {
                        self.service.filters_mut().category = None;
                    } else {
                        self.service.filters_mut().set_category(&text);
                    }
                }
                4 => {
                    self.service.filters_mut().clear();
                    writeln!(self.out, "\nAll filters cleared. Showing all tasks.")?;
                }
                _ => return Ok(Flow::Continue),
            }

            let tasks = self.service.filtered_tasks();
            if tasks.is_empty() {
                writeln!(self.out, "\nNo tasks match current filters")?;
            } else {
                let n = tasks.len();
                writeln!(self.out, "\nShowing {n} task{} with current filters:", if n == 1 { "" } else { "s" })?;
                self.show_tasks(&tasks)?;
            }
        }
    }

    fn handle_sort(&mut self) -> io::Result<Flow> {
        self.heading("SORT TASKS")?;
        if !self.service.has_tasks() {
            self.error("No tasks to sort")?;
            return Ok(Flow::Continue);
        }

        loop {
            writeln!(self.out, "\nAvailable sort options:")?;
            writeln!(self.out, "  [1] Sort by Priority (HIGH -> MEDIUM -> LOW)")?;
            writeln!(self.out, "  [2] Sort Alphabetically by Title (A -> Z)")?;
            writeln!(self.out, "  [3] Default Order (by ID)")?;
            writeln!(self.out, "  [4] Back to Main Menu")?;

            let Some(choice) = self.read_choice(4)? else {
                return Ok(Flow::Exit);
            };
            let tasks = self.service.filtered_tasks();
            let (label, sorted) = match choice {
                1 => ("Tasks sorted by priority", query::sort_by_priority(&tasks)),
                2 => ("Tasks sorted alphabetically (A-Z)", query::sort_alphabetically(&tasks)),
                3 => ("Tasks in default order (by ID)", query::sort_default(&tasks)),
                _ => return Ok(Flow::Continue),
            };
            writeln!(self.out, "\n{label}")?;
            self.show_tasks(&sorted)?;
        }
    }

    fn handle_exit(&mut self) -> io::Result<Flow> {
        writeln!(self.out)?;
        let warning = self.painter.paint("WARNING: All tasks will be lost when you exit.", Color::Yellow);
        writeln!(self.out, "{warning}")?;
        match self.confirm("Are you sure you want to exit? (y/n): ")? {
            None | Some(true) => Ok(Flow::Exit),
            Some(false) => {
                writeln!(self.out, "\n  Returning to main menu...\n")?;
                Ok(Flow::Continue)
            }
        }
    }
}
