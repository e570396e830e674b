use super::range::Range;
use super::week_list::WeekList;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Default display color for newly created courses
pub const DEFAULT_COURSE_COLOR: &str = "#4A90D9";

/// A class occupying one weekday, a block of periods, and a set of weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub classroom: String,
    pub weekday: Weekday,
    /// Weeks the course meets in
    pub week: WeekList,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub note: String,
    // Table-valued fields go last so TOML output stays valid.
    /// Periods occupied, e.g. 3-4
    pub time: Range,
}

fn default_color() -> String {
    DEFAULT_COURSE_COLOR.to_string()
}

impl Course {
    pub fn new(name: impl Into<String>, time: Range, weekday: Weekday, week: WeekList) -> Self {
        Self {
            name: name.into(),
            teacher: String::new(),
            classroom: String::new(),
            weekday,
            week,
            color: default_color(),
            note: String::new(),
            time,
        }
    }

    pub fn is_in_week(&self, week: u32) -> bool {
        self.week.contains(week)
    }

    /// Same weekday and overlapping periods
    ///
    /// Weeks are not considered here; combine with `WeekList::intersects`
    /// for a full conflict.
    pub fn conflicts_with(&self, time: &Range, weekday: Weekday) -> bool {
        self.weekday == weekday && self.time.overlaps(time)
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_teacher(self, teacher: impl Into<String>) -> Self {
        Self {
            teacher: teacher.into(),
            ..self
        }
    }

    pub fn with_classroom(self, classroom: impl Into<String>) -> Self {
        Self {
            classroom: classroom.into(),
            ..self
        }
    }

    pub fn with_time(self, time: Range) -> Self {
        Self { time, ..self }
    }

    pub fn with_weekday(self, weekday: Weekday) -> Self {
        Self { weekday, ..self }
    }

    pub fn with_week(self, week: WeekList) -> Self {
        Self { week, ..self }
    }

    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self
        }
    }

    pub fn with_note(self, note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..self
        }
    }
}
