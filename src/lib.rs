//! Timetable Library
//!
//! A personal timetable manager: terms, courses, recurring week patterns, and
//! the conflict checks that keep two courses out of the same slot.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Command Layer**: `TimetableHandler` - validates arguments, runs queries, formats replies
//! - **Domain Layer**: `model` module - value types and conflict/validity algorithms
//! - **Persistence Layer**: `storage` module - TOML file storage with format migration
//!
//! # Example
//!
//! ```no_run
//! use timetable::TimetableHandler;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let handler = TimetableHandler::new("timetable.toml")?;
//!     println!("{}", handler.handle_list_schedules()?);
//!     Ok(())
//! }
//! ```

pub mod formatting;
pub mod handlers;
pub mod migration;
pub mod model;
mod storage;
pub mod validation;

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use std::sync::{Mutex, MutexGuard};

// Re-export commonly used types
pub use handlers::courses::CourseInput;
pub use model::{
    Course, Date, LocalId, ModelError, Range, Schedule, Settings, TimeSlots, WeekList, WeekParity,
};
pub use storage::Storage;

/// Get the current date in local timezone
pub fn local_date_today() -> Date {
    Date::from(Local::now().date_naive())
}

/// Command handler for timetable management
///
/// Holds the loaded `Settings` behind a mutex so that every command runs its
/// read, conflict check and write against one consistent snapshot. Changes
/// are persisted before they replace the in-memory copy.
pub struct TimetableHandler {
    pub(crate) data: Mutex<Settings>,
    pub(crate) storage: Storage,
    pub(crate) today: Date,
}

impl TimetableHandler {
    /// Create a handler backed by the TOML file at `storage_path`
    ///
    /// # Example
    /// ```no_run
    /// # use timetable::TimetableHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TimetableHandler::new("timetable.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str) -> Result<Self> {
        let storage = Storage::new(storage_path);
        let data = Mutex::new(storage.load()?);
        Ok(Self {
            data,
            storage,
            today: local_date_today(),
        })
    }

    /// Use `today` instead of the local date to work out the current week
    pub fn with_today(self, today: Date) -> Self {
        Self { today, ..self }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Current settings snapshot
    pub fn snapshot(&self) -> Result<Settings> {
        Ok(self.lock()?.clone())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Settings>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("Timetable data lock is poisoned"))
    }

    /// Persist `updated` and make it the current state
    pub(crate) fn commit(&self, data: &mut MutexGuard<'_, Settings>, updated: Settings) -> Result<()> {
        self.storage.save(&updated)?;
        **data = updated;
        Ok(())
    }

    /// The selected schedule, or an error explaining how to select one
    pub(crate) fn selected(settings: &Settings) -> Result<(LocalId, &Schedule)> {
        match settings.selected_schedule() {
            Some(selected) => Ok(selected),
            None if settings.active_schedules().next().is_none() => bail!(
                "No schedules have been created yet. Create one first with new-schedule."
            ),
            None => bail!(
                "No schedule is selected. Use schedules to list them and select to pick one."
            ),
        }
    }

    /// Week number of `today` in `schedule`
    pub(crate) fn current_week(&self, schedule: &Schedule) -> u32 {
        schedule.week_of(&self.today)
    }
}
