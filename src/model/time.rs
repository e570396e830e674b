use super::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// A wall-clock time of day
///
/// Ordering is lexicographic on `(hour, minute)`, which the derived `Ord`
/// provides through field order. Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Time {
    hour: u32,
    minute: u32,
}

impl Time {
    /// Create a time, rejecting `hour >= 24` or `minute >= 60`
    pub fn new(hour: u32, minute: u32) -> Result<Self, ModelError> {
        if hour >= 24 || minute >= 60 {
            return Err(ModelError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// A time known to be in range, for built-in tables
    pub(super) const fn at(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    fn minutes_of_day(&self) -> i32 {
        (self.hour * 60 + self.minute) as i32
    }

    /// Add `minutes` (possibly negative), wrapping around midnight
    pub fn add_minutes(&self, minutes: i32) -> Self {
        let total = (self.minutes_of_day() + minutes).rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (total / 60) as u32,
            minute: (total % 60) as u32,
        }
    }

    /// Signed number of minutes from `other` to `self`
    pub fn minutes_since(&self, other: &Time) -> i32 {
        self.minutes_of_day() - other.minutes_of_day()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for Time {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ModelError::UnparsableTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(unparsable)?;
        let hour = hour.parse::<u32>().map_err(|_| unparsable())?;
        let minute = minute.parse::<u32>().map_err(|_| unparsable())?;
        Time::new(hour, minute)
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}

impl TryFrom<String> for Time {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
