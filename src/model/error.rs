use super::local_id::LocalId;
use thiserror::Error;

/// Failures reported by the schedule domain model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
    #[error("invalid time '{0}', expected HH:MM")]
    UnparsableTime(String),
    #[error("invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("{weeks} weeks after {start} is past the last supported date")]
    DateOutOfRange { start: String, weeks: u32 },
    #[error("invalid period range {start}-{end}")]
    InvalidRange { start: u32, end: u32 },
    #[error("invalid period range '{0}', expected a or a-b")]
    UnparsableRange(String),
    #[error("lesson must end after it starts ({start} - {end})")]
    InvalidLesson { start: String, end: String },
    #[error("invalid week list '{0}'")]
    InvalidWeekList(String),
    #[error("lesson index {index} out of range 1..={total}")]
    IndexOutOfRange { index: u32, total: u32 },
    #[error("no free local id after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },
    #[error("course conflicts with course {0}")]
    CourseConflict(LocalId),
    #[error("course not found: {0}")]
    CourseNotFound(LocalId),
    #[error("schedule not found: {0}")]
    ScheduleNotFound(LocalId),
}
