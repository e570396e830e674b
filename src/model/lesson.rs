use super::error::ModelError;
use super::time::Time;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One class period, from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLesson")]
pub struct Lesson {
    start: Time,
    end: Time,
}

#[derive(Deserialize)]
struct RawLesson {
    start: Time,
    end: Time,
}

impl TryFrom<RawLesson> for Lesson {
    type Error = ModelError;

    fn try_from(raw: RawLesson) -> Result<Self, Self::Error> {
        Lesson::new(raw.start, raw.end)
    }
}

impl Lesson {
    pub fn new(start: Time, end: Time) -> Result<Self, ModelError> {
        if start >= end {
            return Err(ModelError::InvalidLesson {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// A lesson starting at `start` and lasting `minutes`
    pub fn starting_at(start: Time, minutes: i32) -> Result<Self, ModelError> {
        Self::new(start, start.add_minutes(minutes))
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn duration_minutes(&self) -> i32 {
        self.end.minutes_since(&self.start)
    }
}

/// The daily period table: which clock times each numbered period occupies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonTimePeriodInfo {
    #[serde(default)]
    pub morning: Vec<Lesson>,
    #[serde(default)]
    pub afternoon: Vec<Lesson>,
    #[serde(default)]
    pub evening: Vec<Lesson>,
}

/// Length of a built-in period in minutes
const DEFAULT_LESSON_MINUTES: i32 = 45;

const DEFAULT_MORNING: [Time; 4] = [
    Time::at(8, 0),
    Time::at(8, 55),
    Time::at(10, 0),
    Time::at(10, 55),
];
const DEFAULT_AFTERNOON: [Time; 4] = [
    Time::at(14, 0),
    Time::at(14, 55),
    Time::at(16, 0),
    Time::at(16, 55),
];
const DEFAULT_EVENING: [Time; 3] = [Time::at(19, 0), Time::at(19, 55), Time::at(20, 50)];

fn default_lessons(starts: &[Time]) -> Vec<Lesson> {
    starts
        .iter()
        .map(|&start| Lesson {
            start,
            end: start.add_minutes(DEFAULT_LESSON_MINUTES),
        })
        .collect()
}

impl Default for LessonTimePeriodInfo {
    fn default() -> Self {
        Self {
            morning: default_lessons(&DEFAULT_MORNING),
            afternoon: default_lessons(&DEFAULT_AFTERNOON),
            evening: default_lessons(&DEFAULT_EVENING),
        }
    }
}

impl LessonTimePeriodInfo {
    pub fn new(morning: Vec<Lesson>, afternoon: Vec<Lesson>, evening: Vec<Lesson>) -> Self {
        Self {
            morning,
            afternoon,
            evening,
        }
    }

    pub fn total_lessons_count(&self) -> u32 {
        (self.morning.len() + self.afternoon.len() + self.evening.len()) as u32
    }

    /// All periods in order, morning first
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.morning
            .iter()
            .chain(self.afternoon.iter())
            .chain(self.evening.iter())
    }

    /// Look up a period by its 1-based number across the whole day
    pub fn lesson_by_index(&self, index: u32) -> Result<&Lesson, ModelError> {
        let total = self.total_lessons_count();
        if index == 0 || index > total {
            return Err(ModelError::IndexOutOfRange { index, total });
        }
        let mut offset = (index - 1) as usize;
        for part in [&self.morning, &self.afternoon, &self.evening] {
            if offset < part.len() {
                return Ok(&part[offset]);
            }
            offset -= part.len();
        }
        Err(ModelError::IndexOutOfRange { index, total })
    }

    /// 0-based indices of periods that start before the previous period ends
    pub fn conflict_set(&self) -> BTreeSet<usize> {
        let lessons: Vec<&Lesson> = self.lessons().collect();
        lessons
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].start < pair[0].end)
            .map(|(i, _)| i + 1)
            .collect()
    }
}
