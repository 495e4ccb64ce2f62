//! Terminal formatting for tasks.
//!
//! Everything here writes to a caller-supplied `io::Write` and takes `today`
//! as an argument, so output is deterministic under test.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use crossterm::style::{Color, Stylize};

use crate::task::Task;
use crate::validate::format_date;

const RULE_WIDTH: usize = 120;

/// Applies ANSI colours when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    pub enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "TODAY", the date as `YYYY-MM-DD`, or "No due date".
pub fn format_due_date(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "No due date".into(),
        Some(d) if d == today => "TODAY".into(),
        Some(d) => format_date(d),
    }
}

/// Whole days past `due`, or 0 when not yet due.
pub fn days_overdue(due: NaiveDate, today: NaiveDate) -> i64 {
    (today - due).num_days().max(0)
}

/// Truncate a string to a maximum width, adding an ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn status_label(task: &Task, today: NaiveDate) -> &'static str {
    if task.is_completed {
        "[OK]"
    } else if task.is_overdue(today) {
        "[OVERDUE]"
    } else {
        "[pending...]"
    }
}

fn created_local(task: &Task) -> String {
    task.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Write every field of one task.
pub fn write_task_detail<W: Write>(out: &mut W, task: &Task, today: NaiveDate, painter: Painter) -> io::Result<()> {
    let due = match task.due_date {
        Some(d) if task.is_overdue(today) => {
            let late = days_overdue(d, today);
            let note = format!("{} ({late} day{} overdue)", format_date(d), if late == 1 { "" } else { "s" });
            painter.paint(&note, Color::Red)
        }
        other => format_due_date(other, today),
    };
    writeln!(out, "  ID:          {}", task.id)?;
    writeln!(out, "  Title:       {}", task.title)?;
    writeln!(
        out,
        "  Description: {}",
        if task.description.is_empty() { "(none)" } else { &task.description }
    )?;
    writeln!(out, "  Priority:    {}", task.priority)?;
    writeln!(out, "  Category:    {}", task.category.as_deref().unwrap_or("None"))?;
    writeln!(out, "  Due Date:    {due}")?;
    writeln!(out, "  Recurrence:  {}", task.recurrence)?;
    if let Some(p) = task.parent_task_id {
        writeln!(out, "  Parent Task: {p}")?;
    }
    writeln!(
        out,
        "  Status:      {} {}",
        status_label(task, today),
        if task.is_completed { "Completed" } else { "Pending" }
    )?;
    writeln!(out, "  Created:     {}", created_local(task))?;
    Ok(())
}

/// Write tasks as a table followed by a completed/pending/overdue summary.
pub fn write_task_table<W: Write>(out: &mut W, tasks: &[Task], today: NaiveDate, painter: Painter) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{:^width$}", "YOUR TASKS", width = RULE_WIDTH)?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{}",
        painter.bold(&format!(
            "{:<6} | {:<9} | {:<10} | {:<12} | {:<12} | {:<30} | {}",
            "ID", "Priority", "Category", "Due Date", "Status", "Title", "Created"
        ))
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    let mut overdue = 0usize;
    for t in tasks {
        let status = status_label(t, today);
        let status_cell = format!("{status:<12}");
        let status_cell = if t.is_completed {
            painter.paint(&status_cell, Color::Green)
        } else if t.is_overdue(today) {
            overdue += 1;
            painter.paint(&status_cell, Color::Red)
        } else {
            status_cell
        };
        writeln!(
            out,
            "{:<6} | {:<9} | {:<10} | {:<12} | {} | {:<30} | {}",
            t.id,
            t.priority.to_string(),
            truncate(t.category.as_deref().unwrap_or(""), 10),
            format_due_date(t.due_date, today),
            status_cell,
            truncate(&t.title, 30),
            created_local(t)
        )?;
    }

    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    let pending = tasks.len() - completed;
    let mut summary = format!("Total: {} tasks ({completed} completed, {pending} pending", tasks.len());
    if overdue > 0 {
        summary.push_str(&format!(", {overdue} overdue"));
    }
    summary.push(')');
    writeln!(out, "{summary}")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, Recurrence};
    use chrono::Utc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u64, title: &str, due: Option<NaiveDate>, done: bool) -> Task {
        Task {
            id,
            title: title.into(),
            description: String::new(),
            is_completed: done,
            created_at: Utc::now(),
            priority: Priority::High,
            category: Some("Work".into()),
            due_date: due,
            recurrence: Recurrence::None,
            parent_task_id: None,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn due_date_formats() {
        let today = ymd(2025, 6, 10);
        assert_eq!(format_due_date(None, today), "No due date");
        assert_eq!(format_due_date(Some(today), today), "TODAY");
        assert_eq!(format_due_date(Some(ymd(2025, 6, 11)), today), "2025-06-11");
    }

    #[test]
    fn overdue_days() {
        let today = ymd(2025, 6, 10);
        assert_eq!(days_overdue(ymd(2025, 6, 7), today), 3);
        assert_eq!(days_overdue(ymd(2025, 6, 10), today), 0);
        assert_eq!(days_overdue(ymd(2025, 6, 20), today), 0);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("much too long", 6), "much …");
    }

    #[test]
    fn table_summarises_counts() {
        let today = ymd(2025, 6, 10);
        let tasks = vec![
            task(1, "Late", Some(ymd(2025, 6, 1)), false),
            task(2, "Done", Some(ymd(2025, 6, 1)), true),
            task(3, "Later", Some(ymd(2025, 7, 1)), false),
        ];
        let text = render(|buf| write_task_table(buf, &tasks, today, Painter::new(false)));
        assert!(text.contains("[OVERDUE]"));
        assert!(text.contains("[OK]"));
        assert!(text.contains("[pending...]"));
        assert!(text.contains("Total: 3 tasks (1 completed, 2 pending, 1 overdue)"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn detail_shows_parent_and_overdue_days() {
        let today = ymd(2025, 6, 10);
        let mut t = task(5, "Rent", Some(ymd(2025, 6, 8)), false);
        t.parent_task_id = Some(2);
        let text = render(|buf| write_task_detail(buf, &t, today, Painter::new(false)));
        assert!(text.contains("Parent Task: 2"));
        assert!(text.contains("2025-06-08 (2 days overdue)"));
        assert!(text.contains("Description: (none)"));
        assert!(text.contains("Priority:    HIGH"));
    }

    #[test]
    fn disabled_painter_leaves_text_plain() {
        let painter = Painter::new(false);
        assert_eq!(painter.paint("x", Color::Red), "x");
        assert_eq!(painter.bold("x"), "x");
    }
}
