//! Task data structures.
//!
//! [`Task`] is the stored record. [`NewTask`] is a validated task that has not
//! been given an id yet. [`TaskInput`] and [`TaskUpdate`] carry raw, unvalidated
//! text from the caller. [`SeedRecord`] is the external record shape accepted
//! when seeding a session, and [`migrate`] turns it into raw input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A single to-do item.
///
/// `id` and `created_at` are assigned by the store and never change.
/// `parent_task_id` is only set on occurrences produced by completing a
/// recurring task, and always refers to a smaller id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Recurrence,
    pub parent_task_id: Option<u64>,
}

impl Task {
    /// Whether this task is still pending and its due date is before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.due_date.is_some_and(|d| d < today)
    }

    /// Whether completing this task creates a next occurrence.
    pub fn regenerates(&self) -> bool {
        self.recurrence.is_recurring() && self.due_date.is_some()
    }
}

/// A validated task waiting for the store to assign its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    /// Stamped by the store when absent.
    pub created_at: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Recurrence,
    pub parent_task_id: Option<u64>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            is_completed: false,
            created_at: None,
            priority: Priority::default(),
            category: None,
            due_date: None,
            recurrence: Recurrence::default(),
            parent_task_id: None,
        }
    }

    /// The occurrence that follows `parent`, due on `due_date`.
    pub fn next_occurrence(parent: &Task, due_date: NaiveDate) -> Self {
        Self {
            title: parent.title.clone(),
            description: parent.description.clone(),
            is_completed: false,
            created_at: None,
            priority: parent.priority,
            category: parent.category.clone(),
            due_date: Some(due_date),
            recurrence: parent.recurrence,
            parent_task_id: Some(parent.id),
        }
    }
}

/// Raw field text for creating a task.
///
/// Fields are validated in declaration order by [`crate::service::TaskService::add_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub due_date: String,
    pub recurrence: String,
}

impl TaskInput {
    /// Input with the given title and the documented defaults for every other field.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default().as_str().to_string(),
            category: String::new(),
            due_date: String::new(),
            recurrence: Recurrence::default().as_str().to_string(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn priority(mut self, text: impl Into<String>) -> Self {
        self.priority = text.into();
        self
    }

    pub fn category(mut self, text: impl Into<String>) -> Self {
        self.category = text.into();
        self
    }

    pub fn due_date(mut self, text: impl Into<String>) -> Self {
        self.due_date = text.into();
        self
    }

    pub fn recurrence(mut self, text: impl Into<String>) -> Self {
        self.recurrence = text.into();
        self
    }
}

/// Raw field text for updating a task. `None` leaves a field unchanged.
///
/// A blank category or due date clears that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
    pub recurrence: Option<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.recurrence.is_none()
    }
}

/// A task record from outside the running session.
///
/// Only `title` is required; records written before priorities, categories,
/// due dates or recurrence existed simply omit those fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub recurrence: Option<String>,
}

/// A seed record with every missing field filled with its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migrated {
    pub input: TaskInput,
    pub is_completed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Fill the defaults a record may lack. Applied once per record on import.
pub fn migrate(record: SeedRecord) -> Migrated {
    let mut input = TaskInput::new(record.title).description(record.description);
    if let Some(p) = record.priority {
        input = input.priority(p);
    }
    if let Some(c) = record.category {
        input = input.category(c);
    }
    if let Some(d) = record.due_date {
        input = input.due_date(d);
    }
    if let Some(r) = record.recurrence {
        input = input.recurrence(r);
    }
    Migrated {
        input,
        is_completed: record.is_completed,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task() -> Task {
        Task {
            id: 4,
            title: "Water plants".into(),
            description: "Balcony".into(),
            is_completed: false,
            created_at: Utc::now(),
            priority: Priority::Low,
            category: Some("Home".into()),
            due_date: Some(ymd(2025, 6, 1)),
            recurrence: Recurrence::Weekly,
            parent_task_id: None,
        }
    }

    #[test]
    fn overdue_only_when_pending_and_past_due() {
        let mut t = task();
        assert!(t.is_overdue(ymd(2025, 6, 2)));
        assert!(!t.is_overdue(ymd(2025, 6, 1)));
        t.is_completed = true;
        assert!(!t.is_overdue(ymd(2025, 6, 2)));
        t.is_completed = false;
        t.due_date = None;
        assert!(!t.is_overdue(ymd(2030, 1, 1)));
    }

    #[test]
    fn regenerates_needs_recurrence_and_due_date() {
        let mut t = task();
        assert!(t.regenerates());
        t.recurrence = Recurrence::None;
        assert!(!t.regenerates());
        t.recurrence = Recurrence::Daily;
        t.due_date = None;
        assert!(!t.regenerates());
    }

    #[test]
    fn next_occurrence_copies_fields() {
        let parent = task();
        let next = NewTask::next_occurrence(&parent, ymd(2025, 6, 8));
        assert_eq!(next.title, parent.title);
        assert_eq!(next.description, parent.description);
        assert_eq!(next.priority, parent.priority);
        assert_eq!(next.category, parent.category);
        assert_eq!(next.recurrence, parent.recurrence);
        assert_eq!(next.due_date, Some(ymd(2025, 6, 8)));
        assert_eq!(next.parent_task_id, Some(4));
        assert!(!next.is_completed);
        assert!(next.created_at.is_none());
    }

    #[test]
    fn input_defaults() {
        let input = TaskInput::new("Read");
        assert_eq!(input.priority, "medium");
        assert_eq!(input.recurrence, "none");
        assert!(input.category.is_empty());
        assert!(input.due_date.is_empty());
    }

    #[test]
    fn migrate_fills_missing_fields() {
        let record: SeedRecord = serde_json::from_str(r#"{"title": "Old task"}"#).unwrap();
        let migrated = migrate(record);
        assert_eq!(migrated.input, TaskInput::new("Old task"));
        assert!(!migrated.is_completed);
        assert!(migrated.created_at.is_none());
    }

    #[test]
    fn migrate_keeps_present_fields() {
        let record: SeedRecord = serde_json::from_str(
            r#"{"title": "Rent", "description": "flat", "is_completed": true,
                "priority": "HIGH", "category": "Bills", "due_date": "2025-01-31",
                "recurrence": "monthly", "created_at": "2025-01-01T09:00:00Z"}"#,
        )
        .unwrap();
        let migrated = migrate(record);
        assert_eq!(
            migrated.input,
            TaskInput::new("Rent")
                .description("flat")
                .priority("HIGH")
                .category("Bills")
                .due_date("2025-01-31")
                .recurrence("monthly")
        );
        assert!(migrated.is_completed);
        assert_eq!(migrated.created_at.unwrap().to_rfc3339(), "2025-01-01T09:00:00+00:00");
    }

    #[test]
    fn task_serializes_dates_as_text() {
        let json = serde_json::to_value(task()).unwrap();
        assert_eq!(json["due_date"], "2025-06-01");
        assert_eq!(json["priority"], "low");
        assert_eq!(json["recurrence"], "weekly");
        assert_eq!(json["category"], "Home");
    }
}
