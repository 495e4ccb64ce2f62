//! Next-occurrence date arithmetic.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{Error, Result};
use crate::fields::Recurrence;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Compute the due date that follows `current` under `recurrence`.
///
/// Monthly recurrence keeps the day of month, clamped to the last day of the
/// target month: Jan 31 is followed by Feb 28 (Feb 29 in a leap year), Mar 31
/// by Apr 30, and December rolls over into January of the next year.
///
/// Returns [`Error::NotRecurring`] for [`Recurrence::None`]; callers are
/// expected to check [`Recurrence::is_recurring`] first.
pub fn next_due_date(current: NaiveDate, recurrence: Recurrence) -> Result<NaiveDate> {
    let next = match recurrence {
        Recurrence::None => return Err(Error::NotRecurring),
        Recurrence::Daily => current.checked_add_days(Days::new(1)),
        Recurrence::Weekly => current.checked_add_days(Days::new(7)),
        Recurrence::Monthly => {
            let (year, month) = if current.month() == 12 {
                (current.year() + 1, 1)
            } else {
                (current.year(), current.month() + 1)
            };
            let day = current.day().min(days_in_month(year, month));
            NaiveDate::from_ymd_opt(year, month, day)
        }
    };
    next.ok_or(Error::DateOutOfRange(current))
}
