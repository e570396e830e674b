//! Course handlers: add, update, remove, list
//!
//! All of them work on the selected schedule and refuse any change that
//! would put two courses in the same weekday, periods and week.

use crate::TimetableHandler;
use crate::formatting;
use crate::model::{Course, LocalId, ModelError, Range, Schedule, WeekList, WeekParity, Weekday};
use crate::validation;
use anyhow::{Result, anyhow, bail};
use chrono::Utc;

/// Raw course fields as given on the command line
///
/// Every field is optional so the same input serves both adding (where name,
/// weekday and periods are required) and updating (where only given fields change).
#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub classroom: Option<String>,
    pub weekday: Option<String>,
    pub periods: Option<String>,
    pub weeks: Option<String>,
    pub parity: Option<String>,
    pub color: Option<String>,
    pub note: Option<String>,
}

impl CourseInput {
    /// Copy the optional text fields onto `course`
    fn apply_details(&self, mut course: Course) -> Course {
        if let Some(name) = &self.name {
            course = course.with_name(name.trim());
        }
        if let Some(teacher) = &self.teacher {
            course = course.with_teacher(teacher.trim());
        }
        if let Some(classroom) = &self.classroom {
            course = course.with_classroom(classroom.trim());
        }
        if let Some(color) = &self.color {
            course = course.with_color(color.trim());
        }
        if let Some(note) = &self.note {
            course = course.with_note(note.as_str());
        }
        course
    }
}

impl TimetableHandler {
    /// Add a course to the selected schedule
    ///
    /// Without `weeks`, the course gets every free week of its slot that
    /// matches `parity` (all weeks by default).
    pub fn handle_add_course(&self, input: CourseInput) -> Result<String> {
        let name = match input.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => bail!("Course name must not be empty"),
        };
        let weekday = match &input.weekday {
            Some(weekday) => validation::parse_weekday(weekday)?,
            None => bail!("A course needs a weekday (--weekday)"),
        };
        let time = match &input.periods {
            Some(periods) => validation::parse_range(periods)?,
            None => bail!("A course needs its periods (--periods)"),
        };

        let mut data = self.lock()?;
        let (schedule_id, schedule) = Self::selected(&data)?;
        let parity = input.parity.as_deref().unwrap_or("all");
        let week = resolve_weeks(schedule, &time, weekday, None, input.weeks.as_deref(), parity)?;

        let course = input.apply_details(Course::new(name, time, weekday, week));
        let (updated_schedule, course_id) = schedule
            .add_course(course)
            .map_err(|e| conflict_error(schedule, e, &time, weekday, None))?;
        let updated = data.with_schedule(schedule_id, updated_schedule.touched(Utc::now()));
        self.commit(&mut data, updated)?;
        log::info!("added course {} to schedule {}", course_id, schedule_id);

        Ok(format!("Course created with ID: {}", course_id))
    }

    /// Change the given fields of an existing course
    ///
    /// The course's own slot does not count as a conflict.
    pub fn handle_update_course(&self, id: String, input: CourseInput) -> Result<String> {
        let id = validation::parse_local_id(&id)?;
        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            bail!("Course name must not be empty");
        }

        let mut data = self.lock()?;
        let (schedule_id, schedule) = Self::selected(&data)?;
        let Some(existing) = schedule.courses.get(&id) else {
            bail!(
                "Course '{}' does not exist. Use courses to see the courses of the selected schedule.",
                id
            );
        };

        let mut course = existing.clone();
        if let Some(weekday) = &input.weekday {
            course = course.with_weekday(validation::parse_weekday(weekday)?);
        }
        if let Some(periods) = &input.periods {
            let time = validation::parse_range(periods)?;
            course = course.with_time(time);
        }
        if input.weeks.is_some() || input.parity.is_some() {
            let parity = input.parity.as_deref().unwrap_or("all");
            let week = resolve_weeks(
                schedule,
                &course.time,
                course.weekday,
                Some(id),
                input.weeks.as_deref(),
                parity,
            )?;
            course = course.with_week(week);
        }
        let course = input.apply_details(course);
        let (time, weekday) = (course.time, course.weekday);

        let updated_schedule = schedule
            .with_course(id, course)
            .map_err(|e| conflict_error(schedule, e, &time, weekday, Some(id)))?;
        let updated = data.with_schedule(schedule_id, updated_schedule.touched(Utc::now()));
        self.commit(&mut data, updated)?;

        Ok(format!("Course {} updated", id))
    }

    pub fn handle_remove_course(&self, id: String) -> Result<String> {
        let id = validation::parse_local_id(&id)?;
        let mut data = self.lock()?;
        let (schedule_id, schedule) = Self::selected(&data)?;
        let name = match schedule.courses.get(&id) {
            Some(course) => course.name.clone(),
            None => bail!(
                "Course '{}' does not exist. Use courses to see the courses of the selected schedule.",
                id
            ),
        };
        let updated_schedule = schedule.without_course(id)?.touched(Utc::now());
        let updated = data.with_schedule(schedule_id, updated_schedule);
        self.commit(&mut data, updated)?;
        Ok(format!("Course {} ({}) removed", id, name))
    }

    /// List the courses of the selected schedule, optionally only those meeting in `week`
    pub fn handle_list_courses(&self, week: Option<u32>) -> Result<String> {
        let data = self.lock()?;
        let (_, schedule) = Self::selected(&data)?;
        Ok(formatting::format_courses(schedule, week))
    }
}

/// Weeks for a course in `time` on `weekday`
///
/// An explicit list must lie inside the term. Otherwise the free weeks of the
/// slot are filtered by `parity`; an empty result is an error.
fn resolve_weeks(
    schedule: &Schedule,
    time: &Range,
    weekday: Weekday,
    exclude_id: Option<LocalId>,
    weeks: Option<&str>,
    parity: &str,
) -> Result<WeekList> {
    let total_weeks = schedule.total_weeks();
    if let Some(weeks) = weeks {
        let week = validation::parse_week_list(weeks)?;
        validation::check_weeks_in_term(&week, total_weeks)?;
        return Ok(week);
    }

    let parity: WeekParity = validation::parse_week_parity(parity)?;
    let valid_weeks = schedule.valid_weeks_for(time, weekday, exclude_id);
    let week = WeekList::from_parity(parity, total_weeks, Some(&valid_weeks));
    if week.is_empty() {
        bail!(
            "No free weeks left for {} periods {} (parity: {})",
            formatting::weekday_name(weekday),
            time,
            parity
        );
    }
    Ok(week)
}

/// Explain a rejected change, naming the clashing course and the weeks still free
fn conflict_error(
    schedule: &Schedule,
    err: ModelError,
    time: &Range,
    weekday: Weekday,
    exclude_id: Option<LocalId>,
) -> anyhow::Error {
    let ModelError::CourseConflict(other_id) = err else {
        return err.into();
    };
    let free = WeekList::from_weeks(schedule.valid_weeks_for(time, weekday, exclude_id));
    let free = if free.is_empty() {
        "none".to_string()
    } else {
        free.to_string()
    };
    match schedule.courses.get(&other_id) {
        Some(other) => anyhow!(
            "Course conflicts with {}\nFree weeks for {} periods {}: {}",
            formatting::describe_course(other_id, other).trim_start_matches("- "),
            formatting::weekday_name(weekday),
            time,
            free
        ),
        None => anyhow!("Course conflicts with course {}", other_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Date;

    fn schedule() -> Schedule {
        let start = Date::new(2025, 3, 1).unwrap();
        let id = LocalId::new(7).unwrap();
        Schedule::new("Spring", start, start.add_weeks(16).unwrap())
            .with_course(
                id,
                Course::new(
                    "Physics",
                    Range::new(1, 2).unwrap(),
                    Weekday::Mon,
                    WeekList::from_weeks(1..=8),
                ),
            )
            .unwrap()
    }

    #[test]
    fn test_resolve_weeks_uses_free_weeks() {
        let s = schedule();
        let week = resolve_weeks(&s, &Range::new(2, 3).unwrap(), Weekday::Mon, None, None, "all")
            .unwrap();
        assert_eq!(week.sorted(), (9..=16).collect::<Vec<_>>());

        let odd = resolve_weeks(&s, &Range::new(2, 3).unwrap(), Weekday::Mon, None, None, "odd")
            .unwrap();
        assert_eq!(odd.to_string(), "9, 11, 13, 15");
    }

    #[test]
    fn test_resolve_weeks_excluding_self_frees_slot() {
        let s = schedule();
        let id = LocalId::new(7).unwrap();
        let week = resolve_weeks(&s, &Range::new(1, 2).unwrap(), Weekday::Mon, Some(id), None, "all")
            .unwrap();
        assert_eq!(week.len(), 16);
    }

    #[test]
    fn test_resolve_weeks_explicit_outside_term() {
        let s = schedule();
        let err = resolve_weeks(&s, &Range::new(5, 6).unwrap(), Weekday::Tue, None, Some("15-18"), "all")
            .unwrap_err();
        assert_eq!(err.to_string(), "Weeks 17-18 are outside the term (1-16)");
    }

    #[test]
    fn test_resolve_weeks_no_free_weeks() {
        let s = schedule()
            .with_course(
                LocalId::new(8).unwrap(),
                Course::new(
                    "Chemistry",
                    Range::new(1, 2).unwrap(),
                    Weekday::Mon,
                    WeekList::from_weeks(9..=16),
                ),
            )
            .unwrap();
        let err = resolve_weeks(&s, &Range::single(2).unwrap(), Weekday::Mon, None, None, "all").unwrap_err();
        assert!(err.to_string().starts_with("No free weeks left for Monday periods 2 (parity: all)"));
    }

    #[test]
    fn test_conflict_error_names_course_and_free_weeks() {
        let s = schedule();
        let err = conflict_error(
            &s,
            ModelError::CourseConflict(LocalId::new(7).unwrap()),
            &Range::new(2, 3).unwrap(),
            Weekday::Mon,
            None,
        );
        let text = err.to_string();
        assert!(text.contains("Course conflicts with [7] Physics (Monday periods 1-2, weeks 1-8)"));
        assert!(text.contains("Free weeks for Monday periods 2-3: 9-16"));
    }

    #[test]
    fn test_apply_details_only_changes_given_fields() {
        let input = CourseInput {
            classroom: Some(" Lab 3 ".to_string()),
            ..Default::default()
        };
        let course = input.apply_details(
            Course::new("Physics", Range::single(1).unwrap(), Weekday::Mon, WeekList::from_weeks([1]))
                .with_teacher("Dr. Curie"),
        );
        assert_eq!(course.name, "Physics");
        assert_eq!(course.teacher, "Dr. Curie");
        assert_eq!(course.classroom, "Lab 3");
    }
}
