use super::error::ModelError;
use super::range::Range;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Highest week number a `WeekList` holds
///
/// Week numbers are 1-based; anything outside `1..=MAX_WEEK` is never stored,
/// so the text form always parses back.
pub const MAX_WEEK: u32 = 1000;

/// Which weeks of a term a course should recur on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekParity {
    All,
    Odd,
    Even,
}

impl WeekParity {
    pub fn accepts(&self, week: u32) -> bool {
        match self {
            WeekParity::All => true,
            WeekParity::Odd => week % 2 == 1,
            WeekParity::Even => week % 2 == 0,
        }
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WeekParity::All => "all",
            WeekParity::Odd => "odd",
            WeekParity::Even => "even",
        };
        f.write_str(text)
    }
}

impl FromStr for WeekParity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(WeekParity::All),
            "odd" => Ok(WeekParity::Odd),
            "even" => Ok(WeekParity::Even),
            _ => Err(format!(
                "Invalid week parity '{}'. Valid options are: all, odd, even",
                s
            )),
        }
    }
}

/// The set of academic weeks a course recurs on
///
/// Serialized in its compact run-length form, e.g. `"1-3, 5, 8-9"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WeekList {
    weeks: HashSet<u32>,
}

fn is_week(week: u32) -> bool {
    (1..=MAX_WEEK).contains(&week)
}

impl WeekList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an explicit set of week numbers
    ///
    /// Numbers outside `1..=MAX_WEEK` are dropped.
    pub fn from_weeks(weeks: impl IntoIterator<Item = u32>) -> Self {
        Self {
            weeks: weeks.into_iter().filter(|week| is_week(*week)).collect(),
        }
    }

    /// Build from a parity descriptor
    ///
    /// Keeps the weeks of `valid_weeks` (all of `1..=total_weeks` when `None`)
    /// that lie inside the term and match `parity`.
    pub fn from_parity(parity: WeekParity, total_weeks: u32, valid_weeks: Option<&[u32]>) -> Self {
        let total_weeks = total_weeks.min(MAX_WEEK);
        let in_term = |week: &u32| (1..=total_weeks).contains(week);
        let weeks = match valid_weeks {
            Some(valid) => valid
                .iter()
                .copied()
                .filter(in_term)
                .filter(|week| parity.accepts(*week))
                .collect(),
            None => (1..=total_weeks).filter(|week| parity.accepts(*week)).collect(),
        };
        Self { weeks }
    }

    /// Build from a list of period-style ranges, expanded and deduplicated
    ///
    /// Weeks past `MAX_WEEK` are cut off before expanding.
    pub fn from_ranges(ranges: &[Range]) -> Self {
        Self {
            weeks: ranges
                .iter()
                .flat_map(|range| range.start()..=range.end().min(MAX_WEEK))
                .collect(),
        }
    }

    /// Parse the run-length form produced by `Display`
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let mut ranges = Vec::new();
        for token in s.split(',').map(str::trim) {
            if token.is_empty() {
                if s.trim().is_empty() {
                    continue;
                }
                return Err(ModelError::InvalidWeekList(s.to_string()));
            }
            let range = token
                .parse::<Range>()
                .ok()
                .filter(|range| range.end() <= MAX_WEEK)
                .ok_or_else(|| ModelError::InvalidWeekList(s.to_string()))?;
            ranges.push(range);
        }
        Ok(Self::from_ranges(&ranges))
    }

    pub fn contains(&self, week: u32) -> bool {
        self.weeks.contains(&week)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().copied()
    }

    /// Week numbers in ascending order
    pub fn sorted(&self) -> Vec<u32> {
        let mut weeks: Vec<u32> = self.weeks.iter().copied().collect();
        weeks.sort_unstable();
        weeks
    }

    /// True iff both lists share at least one week
    pub fn intersects(&self, other: &WeekList) -> bool {
        let (smaller, larger) = if self.weeks.len() <= other.weeks.len() {
            (&self.weeks, &other.weeks)
        } else {
            (&other.weeks, &self.weeks)
        };
        if smaller.is_empty() {
            return false;
        }
        larger.iter().any(|week| smaller.contains(week))
    }
}

impl fmt::Display for WeekList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weeks = self.sorted();
        let mut runs: Vec<String> = Vec::new();
        let mut iter = weeks.into_iter();
        let Some(first) = iter.next() else {
            return Ok(());
        };
        let (mut run_start, mut run_end) = (first, first);
        for week in iter {
            if week == run_end + 1 {
                run_end = week;
                continue;
            }
            runs.push(format_run(run_start, run_end));
            run_start = week;
            run_end = week;
        }
        runs.push(format_run(run_start, run_end));
        write!(f, "{}", runs.join(", "))
    }
}

fn format_run(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

impl FromStr for WeekList {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeekList::parse(s)
    }
}

impl From<WeekList> for String {
    fn from(list: WeekList) -> Self {
        list.to_string()
    }
}

impl TryFrom<String> for WeekList {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WeekList::parse(&value)
    }
}

impl FromIterator<u32> for WeekList {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self::from_weeks(iter)
    }
}
