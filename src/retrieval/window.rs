//! Historical month windows for retrieval requests.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::RetrievalError;

/// An inclusive calendar-date range covering one full month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The full calendar month `months` before the month containing `target`.
    pub fn months_before(target: NaiveDate, months: u32) -> Result<Self, RetrievalError> {
        let out_of_range = || RetrievalError::WindowOutOfRange(months, target);
        let first = target.with_day(1).ok_or_else(out_of_range)?;
        let start = first
            .checked_sub_months(Months::new(months))
            .ok_or_else(out_of_range)?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;
        Ok(Self { start, end })
    }

    /// The month immediately before `target`'s month.
    pub fn previous_month(target: NaiveDate) -> Result<Self, RetrievalError> {
        Self::months_before(target, 1)
    }

    /// The month two before `target`'s month.
    pub fn two_months_before(target: NaiveDate) -> Result<Self, RetrievalError> {
        Self::months_before(target, 2)
    }

    /// Number of days covered, inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Parses `YYYY-MM` (or a full `YYYY-MM-DD`) into the first day of that month.
pub fn parse_month(text: &str) -> Result<NaiveDate, RetrievalError> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d"))
        .map_err(|_| RetrievalError::InvalidMonth(text.to_string()))?;
    date.with_day(1)
        .ok_or_else(|| RetrievalError::InvalidMonth(text.to_string()))
}
