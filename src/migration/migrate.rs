//! Migration functions for converting between timetable data format versions

use super::legacy_types::{LegacyCourse, LegacySchedule, LegacyWeeks};
use super::normalize::normalize_string_line_endings;
use crate::model::local_id::keyed_map;
use crate::model::{
    CURRENT_FORMAT_VERSION, Course, Date, LocalId, MAX_WEEK, Range, Schedule, Settings, ThemeMode,
    WeekList, Weekday,
};
use anyhow::{Context, Result, anyhow, bail};
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Helper struct for deserializing timetable data with migration support
#[derive(Deserialize)]
pub struct SettingsMigrationHelper {
    #[serde(default)]
    pub(crate) format_version: u32,
    // Version 2 fields
    #[serde(default)]
    pub(crate) selected_schedule_id: Option<LocalId>,
    #[serde(default)]
    pub(crate) theme_mode: ThemeMode,
    #[serde(default, with = "keyed_map")]
    pub(crate) schedules: BTreeMap<LocalId, Schedule>,
    // Version 1 fields (single top-level schedule)
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) term_start_date: Option<Date>,
    #[serde(default)]
    pub(crate) total_weeks: Option<u32>,
    #[serde(default)]
    pub(crate) courses: Vec<LegacyCourse>,
}

impl SettingsMigrationHelper {
    fn is_current(&self) -> bool {
        self.format_version >= 2 || !self.schedules.is_empty()
    }

    fn is_legacy(&self) -> bool {
        self.term_start_date.is_some() || !self.courses.is_empty()
    }
}

/// Bring a freshly deserialized document up to the current format
pub fn migrate_to_latest(helper: SettingsMigrationHelper) -> Result<Settings> {
    if helper.format_version > CURRENT_FORMAT_VERSION {
        bail!(
            "Unsupported format_version {} (this build understands up to {})",
            helper.format_version,
            CURRENT_FORMAT_VERSION
        );
    }

    if helper.is_current() {
        return Ok(Settings {
            format_version: CURRENT_FORMAT_VERSION,
            selected_schedule_id: helper.selected_schedule_id,
            theme_mode: helper.theme_mode,
            schedules: helper.schedules,
        });
    }

    if !helper.is_legacy() {
        return Ok(Settings::new());
    }

    let term_start_date = helper
        .term_start_date
        .ok_or_else(|| anyhow!("Version 1 data is missing term_start_date"))?;
    let legacy = LegacySchedule {
        name: helper.name.unwrap_or_else(|| "Timetable".to_string()),
        term_start_date,
        total_weeks: helper.total_weeks.unwrap_or(DEFAULT_LEGACY_TOTAL_WEEKS),
        courses: helper.courses,
    };
    log::info!(
        "migrating version 1 schedule '{}' ({} courses) to version {}",
        legacy.name,
        legacy.courses.len(),
        CURRENT_FORMAT_VERSION
    );
    migrate_v1_to_v2(legacy, &mut rand::thread_rng())
}

/// Term length assumed when a version 1 file did not record one
pub const DEFAULT_LEGACY_TOTAL_WEEKS: u32 = 20;

/// Migrate a version 1 single-schedule document into `Settings`
///
/// Courses are copied even if they clash, and each receives a fresh local id.
/// The migrated schedule is selected.
pub fn migrate_v1_to_v2<R: Rng + ?Sized>(legacy: LegacySchedule, rng: &mut R) -> Result<Settings> {
    if legacy.total_weeks > MAX_WEEK {
        bail!(
            "Version 1 term of {} weeks is longer than the supported {} weeks",
            legacy.total_weeks,
            MAX_WEEK
        );
    }
    let term_end_date = legacy.term_start_date.add_weeks(legacy.total_weeks)?;
    let mut schedule = Schedule::new(
        normalize_string_line_endings(&legacy.name),
        legacy.term_start_date,
        term_end_date,
    );

    for course in legacy.courses {
        let converted = convert_legacy_course(course, legacy.total_weeks)?;
        let id = schedule.new_course_id_with(rng)?;
        schedule.courses.insert(id, converted);
    }

    let (settings, id) = Settings::new().add_schedule_with(schedule, rng)?;
    Ok(settings.with_selected(id)?)
}

/// Convert a version 1 course into the current representation
///
/// Weeks outside `1..=total_weeks` are dropped with a warning.
pub fn convert_legacy_course(course: LegacyCourse, total_weeks: u32) -> Result<Course> {
    let weekday = legacy_weekday(course.weekday)
        .with_context(|| format!("Course '{}' has an invalid weekday", course.name))?;
    let time = Range::new(course.start_period, course.end_period)
        .with_context(|| format!("Course '{}' has an invalid period range", course.name))?;
    let raw_weeks: Vec<u32> = match course.weeks {
        LegacyWeeks::List(weeks) => weeks,
        LegacyWeeks::Text(text) => WeekList::parse(&text)
            .with_context(|| format!("Course '{}' has an invalid week list", course.name))?
            .sorted(),
    };
    let (in_term, outside): (Vec<u32>, Vec<u32>) = raw_weeks
        .into_iter()
        .partition(|week| (1..=total_weeks).contains(week));
    if !outside.is_empty() {
        log::warn!(
            "course '{}': dropping weeks {:?} outside the term (1-{})",
            course.name,
            outside,
            total_weeks
        );
    }
    let week = WeekList::from_weeks(in_term);

    let mut converted = Course::new(normalize_string_line_endings(&course.name), time, weekday, week);
    if let Some(teacher) = course.teacher {
        converted = converted.with_teacher(normalize_string_line_endings(&teacher));
    }
    if let Some(classroom) = course.classroom {
        converted = converted.with_classroom(normalize_string_line_endings(&classroom));
    }
    if let Some(color) = course.color {
        converted = converted.with_color(color);
    }
    if let Some(note) = course.note {
        converted = converted.with_note(normalize_string_line_endings(&note));
    }
    Ok(converted)
}

/// Map version 1 weekday numbers (1 = Monday .. 7 = Sunday)
pub fn legacy_weekday(number: u8) -> Result<Weekday> {
    match number {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        _ => bail!("weekday {} is not in 1..=7", number),
    }
}
