//! # todo-tracker
//!
//! An in-memory task tracker with priorities, categories, due dates and
//! recurring tasks.
//!
//! The core ([`service::TaskService`] over [`store::TaskStore`], plus the
//! validators, recurrence calculator and query engine) holds no I/O. The shell
//! modules ([`menu`], [`cmd`], [`display`]) sit on top of it and are the only
//! code that writes to a terminal.
//!
//! ```
//! use todo_tracker::{TaskInput, TaskService};
//!
//! let mut service = TaskService::new();
//! let rent = service
//!     .add_task(TaskInput::new("Pay rent").due_date("2025-01-31").recurrence("monthly"))
//!     .unwrap();
//! let toggled = service.toggle_task(rent.id).unwrap();
//! let next = toggled.next_occurrence.unwrap();
//! assert_eq!(next.due_date.unwrap().to_string(), "2025-02-28");
//! assert_eq!(next.parent_task_id, Some(rent.id));
//! ```

pub mod cli;
pub mod cmd;
pub mod display;
pub mod error;
pub mod fields;
pub mod menu;
pub mod query;
pub mod recurrence;
pub mod service;
pub mod store;
pub mod task;
pub mod validate;

pub use error::{Error, ErrorKind, Result, ValidationError};
pub use fields::{Priority, Recurrence, SortKey, Status};
pub use query::TaskFilter;
pub use service::{TaskService, Toggled};
pub use store::TaskStore;
pub use task::{SeedRecord, Task, TaskInput, TaskUpdate};
