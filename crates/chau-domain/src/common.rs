//! Shared traits and calendar helpers for bucketing transactions.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionId;

/// Exposes the stable identifier of a stored record.
pub trait Identifiable {
    fn id(&self) -> &TransactionId;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    /// Unsigned magnitude as recorded.
    fn amount(&self) -> f64;

    /// Amount with the sign implied by the record's direction.
    fn signed_amount(&self) -> f64;
}

/// Converts an entity into a label suitable for logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Calendar month used to group transactions into history buckets.
///
/// Ordering is chronological: by year, then by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month of the year.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns `true` when `date` falls in this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Number of days in this calendar month (28-31).
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Number of days in the given month, falling back to 30 for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1);
    let first_current = NaiveDate::from_ymd_opt(year, month, 1);
    match (first_current, first_next) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 30,
    }
}
