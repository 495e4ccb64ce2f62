//! Error types for the task core.
//!
//! Validators fail with [`ValidationError`]; service operations and the
//! recurrence calculator fail with [`Error`], which wraps validation failures
//! and adds the not-found and contract-violation cases. Every error carries an
//! [`ErrorKind`] so callers can group them without matching each variant.

use chrono::NaiveDate;
use thiserror::Error;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raw text does not have the expected shape.
    Format,
    /// Value parses but violates a length or numeric bound.
    Range,
    /// Value is outside a closed set, or is not a real calendar date.
    Domain,
    /// Referenced id does not exist in the store.
    NotFound,
    /// Caller broke an API contract; never caused by user input.
    Programming,
}

/// Rejection of a raw field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title must be 100 characters or less")]
    TitleTooLong,
    #[error("Description must be 500 characters or less")]
    DescriptionTooLong,
    #[error("Category must be 50 characters or less")]
    CategoryTooLong,
    #[error("Invalid priority '{0}'. Must be one of: high, medium, low")]
    InvalidPriority(String),
    #[error("Invalid recurrence '{0}'. Must be one of: none, daily, weekly, monthly")]
    InvalidRecurrence(String),
    #[error("Invalid date format. Use YYYY-MM-DD. Got: '{0}'")]
    DateFormat(String),
    #[error("Invalid month: {0:02}. Must be 01-12.")]
    MonthOutOfRange(u32),
    #[error("Invalid day: {0:02}. Must be 01-31.")]
    DayOutOfRange(u32),
    #[error("Invalid date: '{0}' is not a day in the calendar")]
    NotACalendarDate(String),
    #[error("Keyword cannot be empty")]
    EmptyKeyword,
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::DateFormat(_) => ErrorKind::Format,
            ValidationError::EmptyTitle
            | ValidationError::TitleTooLong
            | ValidationError::DescriptionTooLong
            | ValidationError::CategoryTooLong
            | ValidationError::MonthOutOfRange(_)
            | ValidationError::DayOutOfRange(_)
            | ValidationError::EmptyKeyword => ErrorKind::Range,
            ValidationError::InvalidPriority(_)
            | ValidationError::InvalidRecurrence(_)
            | ValidationError::NotACalendarDate(_) => ErrorKind::Domain,
        }
    }
}

/// Failure of a core operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Task with ID {0} not found")]
    NotFound(u64),
    #[error("Cannot calculate next date for non-recurring task")]
    NotRecurring,
    #[error("Next occurrence after {0} is outside the supported date range")]
    DateOutOfRange(NaiveDate),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(e) => e.kind(),
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::NotRecurring => ErrorKind::Programming,
            Error::DateOutOfRange(_) => ErrorKind::Range,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(ValidationError::EmptyTitle.to_string(), "Title cannot be empty");
        assert_eq!(
            ValidationError::TitleTooLong.to_string(),
            "Title must be 100 characters or less"
        );
        assert_eq!(
            ValidationError::DescriptionTooLong.to_string(),
            "Description must be 500 characters or less"
        );
        assert_eq!(
            ValidationError::CategoryTooLong.to_string(),
            "Category must be 50 characters or less"
        );
        assert_eq!(
            ValidationError::MonthOutOfRange(13).to_string(),
            "Invalid month: 13. Must be 01-12."
        );
    }

    #[test]
    fn invalid_value_is_named_in_message() {
        let msg = ValidationError::InvalidPriority("urgent".into()).to_string();
        assert!(msg.contains("'urgent'"));
        assert!(msg.contains("high, medium, low"));
    }

    #[test]
    fn kinds() {
        assert_eq!(ValidationError::DateFormat("x".into()).kind(), ErrorKind::Format);
        assert_eq!(ValidationError::NotACalendarDate("2025-02-30".into()).kind(), ErrorKind::Domain);
        assert_eq!(ValidationError::TitleTooLong.kind(), ErrorKind::Range);
        assert_eq!(Error::NotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(Error::NotRecurring.kind(), ErrorKind::Programming);
        assert_eq!(Error::from(ValidationError::EmptyTitle).kind(), ErrorKind::Range);
    }

    #[test]
    fn validation_error_is_transparent() {
        let err = Error::from(ValidationError::EmptyKeyword);
        assert_eq!(err.to_string(), "Keyword cannot be empty");
    }
}
