//! Task use cases.
//!
//! [`TaskService`] owns the [`TaskStore`] and is the only place that combines
//! validation, recurrence and storage. Every operation validates before it
//! writes, so a failed call leaves the store unchanged.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::query::{self, TaskFilter};
use crate::recurrence::next_due_date;
use crate::store::TaskStore;
use crate::task::{migrate, NewTask, SeedRecord, Task, TaskInput, TaskUpdate};
use crate::validate::*;

/// Result of toggling a task's completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    /// The toggled task as stored after the flip.
    pub task: Task,
    /// The next occurrence, when completing a recurring task with a due date.
    pub next_occurrence: Option<Task>,
}

#[derive(Debug, Default)]
pub struct TaskService {
    store: TaskStore,
    filters: TaskFilter,
}

impl TaskService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_tasks(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.store.count()
    }

    /// All tasks in creation order.
    pub fn get_all_tasks(&self) -> Vec<Task> {
        query::sort_default(self.store.tasks())
    }

    pub fn get_task(&self, id: u64) -> Option<Task> {
        self.store.get_by_id(id)
    }

    /// Validate raw input and store it as a new pending task.
    ///
    /// Fields are checked in the order title, description, priority,
    /// category, due date, recurrence; the first failure is returned.
    pub fn add_task(&mut self, input: TaskInput) -> Result<Task> {
        let new = validate_input(&input)?;
        let task = self.store.add(new);
        debug!(id = task.id, title = %task.title, "task added");
        Ok(task)
    }

    /// Apply the fields present in `update` to task `id`.
    ///
    /// `id`, `created_at`, `is_completed` and `parent_task_id` are never
    /// changed here.
    pub fn update_task(&mut self, id: u64, update: TaskUpdate) -> Result<Task> {
        let mut task = self.store.get_by_id(id).ok_or(Error::NotFound(id))?;

        if let Some(ref t) = update.title {
            task.title = validate_title(t)?;
        }
        if let Some(ref d) = update.description {
            task.description = validate_description(d)?;
        }
        if let Some(ref p) = update.priority {
            task.priority = validate_priority(p)?;
        }
        if let Some(ref c) = update.category {
            task.category = validate_category(c)?;
        }
        if let Some(ref d) = update.due_date {
            task.due_date = validate_due_date(d)?;
        }
        if let Some(ref r) = update.recurrence {
            task.recurrence = validate_recurrence(r)?;
        }

        if !self.store.update(task.clone()) {
            return Err(Error::NotFound(id));
        }
        debug!(id, "task updated");
        Ok(task)
    }

    /// Remove task `id`. Freed ids are never handed out again.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let deleted = self.store.delete(id);
        debug!(id, deleted, "task delete");
        deleted
    }

    /// Flip the completion flag of task `id`.
    ///
    /// Completing (not reopening) a recurring task that has a due date also
    /// creates its next occurrence, linked back through `parent_task_id`.
    /// The original task stays in the store, marked completed.
    pub fn toggle_task(&mut self, id: u64) -> Result<Toggled> {
        let mut task = self.store.get_by_id(id).ok_or(Error::NotFound(id))?;
        let completing = !task.is_completed;

        // Work out the next date before any write, so an out-of-range date
        // leaves the store as it was.
        let next = match task.due_date {
            Some(due) if completing && task.recurrence.is_recurring() => {
                Some(NewTask::next_occurrence(&task, next_due_date(due, task.recurrence)?))
            }
            _ => None,
        };

        task.is_completed = completing;
        if !self.store.update(task.clone()) {
            return Err(Error::NotFound(id));
        }
        debug!(id, completed = completing, "task toggled");

        let next_occurrence = next.map(|n| {
            let created = self.store.add(n);
            info!(
                parent = id,
                id = created.id,
                due = ?created.due_date,
                "next occurrence created"
            );
            created
        });

        Ok(Toggled {
            task,
            next_occurrence,
        })
    }

    /// Search all tasks, in creation order.
    pub fn search_tasks(&self, keyword: &str) -> Result<Vec<Task>> {
        Ok(query::search(keyword, &self.get_all_tasks())?)
    }

    /// Session filter applied by [`TaskService::filtered_tasks`].
    pub fn filters(&self) -> &TaskFilter {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut TaskFilter {
        &mut self.filters
    }

    /// All tasks passing the session filter, in creation order.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        query::filter(&self.get_all_tasks(), &self.filters)
    }

    /// Load external records into the store.
    ///
    /// Every record is migrated and validated before the first one is added;
    /// if any record is invalid nothing is imported. Imported tasks get fresh
    /// ids in record order. Returns the number of tasks added.
    pub fn import(&mut self, records: Vec<SeedRecord>) -> Result<usize> {
        let mut validated = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let migrated = migrate(record);
            let mut new = validate_input(&migrated.input).inspect_err(|e| {
                warn!(index, error = %e, "rejected seed record");
            })?;
            new.is_completed = migrated.is_completed;
            new.created_at = migrated.created_at;
            validated.push(new);
        }

        let count = validated.len();
        for new in validated {
            self.store.add(new);
        }
        debug!(count, "seed records imported");
        Ok(count)
    }
}

fn validate_input(input: &TaskInput) -> Result<NewTask> {
    let title = validate_title(&input.title)?;
    let description = validate_description(&input.description)?;
    let priority = validate_priority(&input.priority)?;
    let category = validate_category(&input.category)?;
    let due_date = validate_due_date(&input.due_date)?;
    let recurrence = validate_recurrence(&input.recurrence)?;
    Ok(NewTask {
        description,
        priority,
        category,
        due_date,
        recurrence,
        ..NewTask::new(title)
    })
}
