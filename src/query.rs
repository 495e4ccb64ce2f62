//! Search, filtering and sorting over task lists.
//!
//! Every function here takes a slice and returns a new `Vec`, so results can
//! be chained (filter, then sort) without touching the store.

use std::fmt;

use crate::error::ValidationError;
use crate::fields::{Priority, SortKey, Status};
use crate::task::Task;
use crate::validate::validate_keyword;

/// Filter criteria. Absent criteria match everything; present ones are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring of the task's category.
    pub category: Option<String>,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.category.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Set the category criterion; blank text removes it.
    pub fn set_category(&mut self, text: &str) {
        let cleaned = text.trim();
        self.category = (!cleaned.is_empty()).then(|| cleaned.to_string());
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(s) = self.status {
            if !s.matches(task.is_completed) {
                return false;
            }
        }
        if let Some(p) = self.priority {
            if task.priority != p {
                return false;
            }
        }
        if let Some(ref wanted) = self.category {
            let wanted = wanted.to_lowercase();
            match task.category {
                Some(ref c) if c.to_lowercase().contains(&wanted) => {}
                _ => return false,
            }
        }
        true
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(s) = self.status {
            parts.push(format!("status={}", s.as_str()));
        }
        if let Some(p) = self.priority {
            parts.push(format!("priority={}", p.as_str()));
        }
        if let Some(ref c) = self.category {
            parts.push(format!("category={c}"));
        }
        if parts.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Tasks whose title or description contains `keyword`, ignoring case.
///
/// Fails when the keyword is blank. Input order is preserved.
pub fn search(keyword: &str, tasks: &[Task]) -> Result<Vec<Task>, ValidationError> {
    let needle = validate_keyword(keyword)?.to_lowercase();
    Ok(tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle) || t.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect())
}

/// Tasks matching every present criterion, in input order.
pub fn filter(tasks: &[Task], criteria: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| criteria.matches(t)).cloned().collect()
}

/// High to low priority; newest first within a priority.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority).then(b.created_at.cmp(&a.created_at)));
    sorted
}

/// Title A to Z ignoring case; newest first within equal titles.
pub fn sort_alphabetically(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_cached_key(|t| (t.title.to_lowercase(), std::cmp::Reverse(t.created_at)));
    sorted
}

/// Creation order.
pub fn sort_default(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|t| t.id);
    sorted
}

pub fn sort(tasks: &[Task], key: SortKey) -> Vec<Task> {
    match key {
        SortKey::Id => sort_default(tasks),
        SortKey::Priority => sort_by_priority(tasks),
        SortKey::Title => sort_alphabetically(tasks),
    }
}
