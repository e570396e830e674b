use super::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An inclusive block of 1-based class periods, e.g. periods 3-4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    start: u32,
    end: u32,
}

#[derive(Deserialize)]
struct RawRange {
    start: u32,
    end: u32,
}

impl TryFrom<RawRange> for Range {
    type Error = ModelError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Range::new(raw.start, raw.end)
    }
}

impl Range {
    /// Create a range; both bounds must be positive and `start <= end`
    pub fn new(start: u32, end: u32) -> Result<Self, ModelError> {
        if start == 0 || start > end {
            return Err(ModelError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one period
    pub fn single(period: u32) -> Result<Self, ModelError> {
        Self::new(period, period)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of periods past the first, `end - start`
    pub fn span(&self) -> u32 {
        self.end - self.start
    }

    pub fn contains(&self, value: u32) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.end >= other.start && self.start <= other.end
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for Range {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ModelError::UnparsableRange(s.to_string());
        let parse_bound = |part: &str| part.trim().parse::<u32>().map_err(|_| unparsable());
        match s.split_once('-') {
            Some((start, end)) => Range::new(parse_bound(start)?, parse_bound(end)?),
            None => Range::single(parse_bound(s)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u32, end: u32) -> Range {
        Range::new(start, end).unwrap()
    }

    #[test]
    fn test_range_rejects_reversed_and_zero_bounds() {
        assert_eq!(
            Range::new(4, 3),
            Err(ModelError::InvalidRange { start: 4, end: 3 })
        );
        assert!(Range::new(0, 2).is_err());
        assert!(Range::new(3, 3).is_ok());
    }

    #[test]
    fn test_range_overlap_is_inclusive() {
        assert!(r(1, 2).overlaps(&r(2, 3)));
        assert!(r(2, 3).overlaps(&r(1, 2)));
        assert!(r(1, 4).overlaps(&r(2, 2)));
        assert!(!r(1, 2).overlaps(&r(3, 4)));
        assert!(!r(3, 4).overlaps(&r(1, 2)));
    }

    #[test]
    fn test_range_text_form() {
        assert_eq!(r(3, 4).to_string(), "3-4");
        assert_eq!(r(5, 5).to_string(), "5");
        assert_eq!("1-2".parse::<Range>().unwrap(), r(1, 2));
        assert_eq!(" 7 ".parse::<Range>().unwrap(), r(7, 7));
        assert!("2-1".parse::<Range>().is_err());
        assert!("a-b".parse::<Range>().is_err());
    }

    #[test]
    fn test_range_deserialization_validates() {
        let ok: Range = toml::from_str("start = 1\nend = 2").unwrap();
        assert_eq!(ok, r(1, 2));
        assert!(toml::from_str::<Range>("start = 3\nend = 2").is_err());
    }
}
