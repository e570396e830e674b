use super::error::ModelError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar date without timezone, used to anchor academic weeks
///
/// Academic weeks always run Monday to Sunday. The first (partial) week of a
/// term is week 1, whatever weekday the term starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Create a date, rejecting days that do not exist in the proleptic Gregorian calendar
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ModelError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(ModelError::InvalidDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> chrono::Weekday {
        self.0.weekday()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Number of the academic week `target` falls in, counting `self`'s week as 1
    ///
    /// Returns 0 when `target` precedes `self`.
    pub fn weeks_till(&self, target: &Date) -> u32 {
        if target < self {
            return 0;
        }
        let start_offset = self.0.weekday().num_days_from_monday() as i64;
        let end_offset = target.0.weekday().num_days_from_monday() as i64;
        let days = (target.0 - self.0).num_days();
        // Non-negative once target >= self: both dates are moved back to their Mondays.
        let adjusted_days = days + start_offset - end_offset;
        (adjusted_days / 7 + 1) as u32
    }

    /// The last day of academic week `weeks`, counted from `self`
    ///
    /// `add_weeks(0)` returns `self`. For `weeks >= 1` the result satisfies
    /// `self.weeks_till(&self.add_weeks(weeks)?) == weeks`. Fails with
    /// `DateOutOfRange` when the result is past the last representable date.
    pub fn add_weeks(&self, weeks: u32) -> Result<Date, ModelError> {
        if weeks == 0 {
            return Ok(*self);
        }
        let out_of_range = || ModelError::DateOutOfRange {
            start: self.to_string(),
            weeks,
        };
        let mut candidate = self
            .0
            .checked_add_days(Days::new(u64::from(weeks) * 7))
            .map(Date)
            .ok_or_else(out_of_range)?;
        while self.weeks_till(&candidate) > weeks {
            candidate = candidate
                .0
                .checked_sub_days(Days::new(1))
                .map(Date)
                .ok_or_else(out_of_range)?;
        }
        Ok(candidate)
    }

    /// Shift by a signed number of calendar days; `None` past the representable range
    pub fn add_days(&self, days: i64) -> Option<Date> {
        let delta = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(delta)
        } else {
            self.0.checked_sub_days(delta)
        };
        shifted.map(Date)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Date)
    }
}
