//! Closed-set field types for tasks.
//!
//! This module defines the enumerations stored on a task (priority and
//! recurrence) and the selector types used by the query engine (completion
//! status and sort keys). None of these are ever stored as raw strings; text
//! is turned into them by the validators in [`crate::validate`].

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
///
/// Ordered `High > Medium > Low`, which is the order used by priority sorts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Lowercase name, as accepted by the validator.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// How often a task repeats once completed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub const ALL: [Recurrence; 4] = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    /// Whether completing a task with this pattern can produce a next occurrence.
    pub fn is_recurring(self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Completion status used as a filter criterion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub fn matches(self, is_completed: bool) -> bool {
        match self {
            Status::Pending => !is_completed,
            Status::Completed => is_completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }
}

/// Available orderings for task lists.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum SortKey {
    /// Creation order.
    #[default]
    Id,
    /// High to low, newest first within a priority.
    Priority,
    /// Title A to Z, newest first within equal titles.
    Title,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_high_above_low() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        let mut all = vec![Priority::Low, Priority::High, Priority::Medium];
        all.sort();
        assert_eq!(all, vec![Priority::Low, Priority::Medium, Priority::High]);
    }

    #[test]
    fn defaults() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Recurrence::default(), Recurrence::None);
        assert_eq!(SortKey::default(), SortKey::Id);
    }

    #[test]
    fn display_is_uppercase() {
        assert_eq!(Priority::High.to_string(), "HIGH");
        assert_eq!(Recurrence::Monthly.to_string(), "MONTHLY");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
        let r: Recurrence = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(r, Recurrence::Weekly);
    }

    #[test]
    fn status_matches_completion_flag() {
        assert!(Status::Pending.matches(false));
        assert!(!Status::Pending.matches(true));
        assert!(Status::Completed.matches(true));
        assert!(!Status::Completed.matches(false));
    }

    #[test]
    fn only_none_is_not_recurring() {
        for r in Recurrence::ALL {
            assert_eq!(r.is_recurring(), r != Recurrence::None);
        }
    }
}
