//! Timetable domain model and conflict detection
//!
//! All types here are plain values. Updates go through `with_*`/`without_*`
//! methods that return a new value, so a `Settings` snapshot can be checked
//! and replaced without any shared mutable state.
//!
//! - `time`, `date`, `range`: scalar values and academic week arithmetic
//! - `week_list`: week sets and their run-length text form
//! - `lesson`: the daily period table
//! - `course`, `schedule`: courses and the conflict/validity queries
//! - `settings`: the aggregate root holding every schedule
//! - `local_id`: small random ids scoped to one aggregate

mod course;
mod date;
mod error;
mod lesson;
pub mod local_id;
mod range;
mod schedule;
mod settings;
mod time;
mod week_list;

pub use chrono::Weekday;
pub use course::{Course, DEFAULT_COURSE_COLOR};
pub use date::Date;
pub use error::ModelError;
pub use lesson::{Lesson, LessonTimePeriodInfo};
pub use local_id::{LocalId, MAX_ID_ATTEMPTS, MAX_LOCAL_ID};
pub use range::Range;
pub use schedule::{Schedule, TimeSlots};
pub use settings::{CURRENT_FORMAT_VERSION, Settings, ThemeMode};
pub use time::Time;
pub use week_list::{MAX_WEEK, WeekList, WeekParity};
