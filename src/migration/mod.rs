//! Migration module for timetable data format versions
//!
//! Each version migration is implemented as a separate function so that old
//! files can be walked step by step up to the latest format.
//!
//! ## Migration Strategy
//!
//! When a new format version is introduced:
//! 1. Add a new migration function (e.g., `migrate_v2_to_v3`)
//! 2. Update `migrate_to_latest` to chain migrations
//! 3. Add tests for the new migration path
//!
//! ## Current Versions
//!
//! - **Version 1**: One schedule at the top level, courses as `[[courses]]`
//!   with numeric weekdays, `start_period`/`end_period` and integer week arrays
//! - **Version 2**: `Settings` with `[schedules.<id>]` tables, each holding
//!   `[schedules.<id>.courses.<id>]` tables and run-length week strings

mod legacy_types;
mod migrate;
mod normalize;

pub use legacy_types::{LegacyCourse, LegacySchedule, LegacyWeeks};
pub use migrate::{
    DEFAULT_LEGACY_TOTAL_WEEKS, SettingsMigrationHelper, convert_legacy_course, legacy_weekday,
    migrate_to_latest, migrate_v1_to_v2,
};
pub use normalize::normalize_string_line_endings;

use crate::model::Settings;
use anyhow::Result;

/// Parse a TOML document of any known version into current `Settings`
pub fn settings_from_toml(content: &str) -> Result<Settings> {
    let helper: SettingsMigrationHelper = toml::from_str(content)?;
    migrate_to_latest(helper)
}
