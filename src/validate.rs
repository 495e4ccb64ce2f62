//! Field validators.
//!
//! Each validator trims its input, then either returns the normalised typed
//! value or a [`ValidationError`]. Validators never substitute defaults: a
//! caller that wants "medium" for a blank priority must pass "medium".

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::fields::{Priority, Recurrence};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_CATEGORY_LEN: usize = 50;

/// Textual date format used at every boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a title: 1..=100 characters after trimming.
pub fn validate_title(text: &str) -> Result<String, ValidationError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if cleaned.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(cleaned.to_string())
}

/// Validate a description: 0..=500 characters after trimming.
pub fn validate_description(text: &str) -> Result<String, ValidationError> {
    let cleaned = text.trim();
    if cleaned.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(cleaned.to_string())
}

pub fn validate_priority(text: &str) -> Result<Priority, ValidationError> {
    let folded = text.trim().to_lowercase();
    Priority::ALL
        .into_iter()
        .find(|p| p.as_str() == folded)
        .ok_or_else(|| ValidationError::InvalidPriority(text.trim().to_string()))
}

/// Validate a category. Blank input means "no category".
pub fn validate_category(text: &str) -> Result<Option<String>, ValidationError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }
    if cleaned.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::CategoryTooLong);
    }
    Ok(Some(cleaned.to_string()))
}

/// Validate a `YYYY-MM-DD` due date. Blank input means "no deadline".
///
/// Shape is checked first (four digits, hyphen, two digits, hyphen, two
/// digits), then the month and day ranges, then the real calendar, so
/// `2025-13-01`, `2025-01-32` and `2025-02-29` each fail with a different
/// error.
pub fn validate_due_date(text: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let b = cleaned.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9].iter().all(|&i| b[i].is_ascii_digit());
    if !shaped {
        return Err(ValidationError::DateFormat(text.to_string()));
    }

    // All-digit slices of fixed width cannot fail to parse.
    let year: i32 = cleaned[0..4].parse().map_err(|_| ValidationError::DateFormat(text.to_string()))?;
    let month: u32 = cleaned[5..7].parse().map_err(|_| ValidationError::DateFormat(text.to_string()))?;
    let day: u32 = cleaned[8..10].parse().map_err(|_| ValidationError::DateFormat(text.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange(month));
    }
    if !(1..=31).contains(&day) {
        return Err(ValidationError::DayOutOfRange(day));
    }
    // There is no year zero in the Gregorian calendar.
    if year < 1 {
        return Err(ValidationError::NotACalendarDate(cleaned.to_string()));
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| ValidationError::NotACalendarDate(cleaned.to_string()))
}

pub fn validate_recurrence(text: &str) -> Result<Recurrence, ValidationError> {
    let folded = text.trim().to_lowercase();
    Recurrence::ALL
        .into_iter()
        .find(|r| r.as_str() == folded)
        .ok_or_else(|| ValidationError::InvalidRecurrence(text.trim().to_string()))
}

/// Validate a search keyword, returning it trimmed.
pub fn validate_keyword(text: &str) -> Result<&str, ValidationError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyKeyword);
    }
    Ok(cleaned)
}

/// Format a date the way [`validate_due_date`] accepts it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
