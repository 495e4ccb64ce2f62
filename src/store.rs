//! In-memory task storage.
//!
//! The store owns identity: it assigns ids and creation timestamps and keeps
//! them fixed. It holds no business rules; validation and recurrence live in
//! [`crate::service`].

use chrono::Utc;
use tracing::trace;

use crate::task::{NewTask, Task};

/// Ordered collection of tasks for the lifetime of the process.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Store a task under the next sequential id.
    ///
    /// Ids start at 1 and are never reused, even after deletion.
    pub fn add(&mut self, new: NewTask) -> Task {
        let id = self.next_id;
        self.next_id += 1;
        debug_assert!(new.parent_task_id.map_or(true, |p| p < id));

        let task = Task {
            id,
            title: new.title,
            description: new.description,
            is_completed: new.is_completed,
            created_at: new.created_at.unwrap_or_else(Utc::now),
            priority: new.priority,
            category: new.category,
            due_date: new.due_date,
            recurrence: new.recurrence,
            parent_task_id: new.parent_task_id,
        };
        trace!(id, "assigned task id");
        self.tasks.push(task.clone());
        task
    }

    /// Snapshot of all tasks in insertion order.
    pub fn get_all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Borrowed view of all tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_by_id(&self, id: u64) -> Option<Task> {
        self.get(id).cloned()
    }

    /// Replace the stored task that has `task.id`.
    ///
    /// Returns false when no such task exists. The stored `created_at` is
    /// kept regardless of what `task` carries.
    pub fn update(&mut self, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
            return false;
        };
        let created_at = slot.created_at;
        *slot = Task { created_at, ..task };
        true
    }

    /// Remove a task. Tasks that name it as their parent are left untouched.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(idx);
        true
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
