use super::course::Course;
use super::date::Date;
use super::error::ModelError;
use super::lesson::LessonTimePeriodInfo;
use super::local_id::{LocalId, allocate_local_id, keyed_map};
use super::range::Range;
use chrono::{DateTime, Utc, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Period ranges used on one weekday, split by whether they meet in a given week
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlots {
    /// Ranges with at least one course meeting in the current week
    pub current_week_ranges: HashSet<Range>,
    /// The remaining ranges, narrowest first
    pub other_week_ranges: Vec<Range>,
    pub all_ranges: HashSet<Range>,
}

/// The courses of one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    pub term_start_date: Date,
    pub term_end_date: Date,
    #[serde(default)]
    pub display_weekends: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub lesson_time_period_info: LessonTimePeriodInfo,
    #[serde(default, with = "keyed_map")]
    pub courses: BTreeMap<LocalId, Course>,
}

impl Schedule {
    /// Create an empty schedule for the term `term_start_date..=term_end_date`
    pub fn new(name: impl Into<String>, term_start_date: Date, term_end_date: Date) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            deleted: false,
            term_start_date,
            term_end_date,
            display_weekends: false,
            created_at: now,
            updated_at: now,
            lesson_time_period_info: LessonTimePeriodInfo::default(),
            courses: BTreeMap::new(),
        }
    }

    /// Number of academic weeks in the term
    pub fn total_weeks(&self) -> u32 {
        self.term_start_date.weeks_till(&self.term_end_date)
    }

    pub fn is_in_term(&self, week: u32) -> bool {
        (1..=self.total_weeks()).contains(&week)
    }

    /// Academic week `date` falls in; 0 before the term starts
    pub fn week_of(&self, date: &Date) -> u32 {
        self.term_start_date.weeks_till(date)
    }

    fn other_courses(&self, exclude_id: Option<LocalId>) -> impl Iterator<Item = (&LocalId, &Course)> {
        self.courses
            .iter()
            .filter(move |(id, _)| Some(**id) != exclude_id)
    }

    /// Id of the first course that `course` would clash with
    pub fn find_conflict(&self, course: &Course, exclude_id: Option<LocalId>) -> Option<LocalId> {
        self.other_courses(exclude_id)
            .find(|(_, existing)| {
                existing.conflicts_with(&course.time, course.weekday)
                    && existing.week.intersects(&course.week)
            })
            .map(|(id, _)| *id)
    }

    /// Whether saving `course` would clash with another course in the same
    /// weekday, periods and at least one week
    pub fn has_conflict(&self, course: &Course, exclude_id: Option<LocalId>) -> bool {
        self.find_conflict(course, exclude_id).is_some()
    }

    /// Weeks of the term in which `time` on `weekday` is still free
    pub fn valid_weeks_for(
        &self,
        time: &Range,
        weekday: Weekday,
        exclude_id: Option<LocalId>,
    ) -> Vec<u32> {
        let occupied: HashSet<u32> = self
            .other_courses(exclude_id)
            .filter(|(_, course)| course.conflicts_with(time, weekday))
            .flat_map(|(_, course)| course.week.iter())
            .collect();
        (1..=self.total_weeks())
            .filter(|week| !occupied.contains(week))
            .collect()
    }

    /// Distinct period ranges used on `weekday`, split around `current_week`
    pub fn time_slots_for(&self, weekday: Weekday, current_week: u32) -> TimeSlots {
        let in_term = self.is_in_term(current_week);
        let mut all_ranges = HashSet::new();
        let mut current_week_ranges = HashSet::new();
        for course in self.courses.values().filter(|c| c.weekday == weekday) {
            all_ranges.insert(course.time);
            if in_term && course.is_in_week(current_week) {
                current_week_ranges.insert(course.time);
            }
        }
        let mut other_week_ranges: Vec<Range> = all_ranges
            .difference(&current_week_ranges)
            .copied()
            .collect();
        other_week_ranges.sort_by_key(|range| (range.span(), range.start(), range.end()));
        TimeSlots {
            current_week_ranges,
            other_week_ranges,
            all_ranges,
        }
    }

    /// Courses held exactly in `time` on `weekday` during `week`
    pub fn courses_at(&self, time: &Range, weekday: Weekday, week: u32) -> Vec<(LocalId, &Course)> {
        self.courses
            .iter()
            .filter(|(_, c)| c.time == *time && c.weekday == weekday && c.is_in_week(week))
            .map(|(id, c)| (*id, c))
            .collect()
    }

    /// Courses on `weekday` whose periods overlap `time`, in any week
    pub fn courses_overlapping(&self, time: &Range, weekday: Weekday) -> Vec<(LocalId, &Course)> {
        self.courses
            .iter()
            .filter(|(_, c)| c.conflicts_with(time, weekday))
            .map(|(id, c)| (*id, c))
            .collect()
    }

    /// Courses held exactly in `time` on `weekday` but not during `current_week`
    ///
    /// Outside the term no week is current, so every course in the slot is returned.
    pub fn other_week_courses_at(
        &self,
        time: &Range,
        weekday: Weekday,
        current_week: u32,
    ) -> Vec<(LocalId, &Course)> {
        let in_term = self.is_in_term(current_week);
        self.courses
            .iter()
            .filter(|(_, c)| c.time == *time && c.weekday == weekday)
            .filter(|(_, c)| !in_term || !c.is_in_week(current_week))
            .map(|(id, c)| (*id, c))
            .collect()
    }

    pub fn new_course_id(&self) -> Result<LocalId, ModelError> {
        self.new_course_id_with(&mut rand::thread_rng())
    }

    pub fn new_course_id_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LocalId, ModelError> {
        allocate_local_id(rng, |id| self.courses.contains_key(&id))
    }

    /// Insert or replace the course stored under `id`
    ///
    /// Fails with `CourseConflict` if the course clashes with any other course.
    pub fn with_course(&self, id: LocalId, course: Course) -> Result<Schedule, ModelError> {
        if let Some(other) = self.find_conflict(&course, Some(id)) {
            log::debug!("rejecting course '{}': conflicts with {}", course.name, other);
            return Err(ModelError::CourseConflict(other));
        }
        let mut courses = self.courses.clone();
        courses.insert(id, course);
        Ok(Schedule {
            courses,
            ..self.clone()
        })
    }

    /// Store `course` under a freshly allocated id
    pub fn add_course(&self, course: Course) -> Result<(Schedule, LocalId), ModelError> {
        self.add_course_with(course, &mut rand::thread_rng())
    }

    pub fn add_course_with<R: Rng + ?Sized>(
        &self,
        course: Course,
        rng: &mut R,
    ) -> Result<(Schedule, LocalId), ModelError> {
        let id = self.new_course_id_with(rng)?;
        Ok((self.with_course(id, course)?, id))
    }

    pub fn without_course(&self, id: LocalId) -> Result<Schedule, ModelError> {
        if !self.courses.contains_key(&id) {
            return Err(ModelError::CourseNotFound(id));
        }
        let mut courses = self.courses.clone();
        courses.remove(&id);
        Ok(Schedule {
            courses,
            ..self.clone()
        })
    }

    pub fn with_name(&self, name: impl Into<String>) -> Schedule {
        Schedule {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_term(&self, term_start_date: Date, term_end_date: Date) -> Schedule {
        Schedule {
            term_start_date,
            term_end_date,
            ..self.clone()
        }
    }

    pub fn with_lesson_time_period_info(&self, info: LessonTimePeriodInfo) -> Schedule {
        Schedule {
            lesson_time_period_info: info,
            ..self.clone()
        }
    }

    pub fn with_display_weekends(&self, display_weekends: bool) -> Schedule {
        Schedule {
            display_weekends,
            ..self.clone()
        }
    }

    pub fn with_deleted(&self, deleted: bool) -> Schedule {
        Schedule {
            deleted,
            ..self.clone()
        }
    }

    /// Stamp the last-modified time
    pub fn touched(self, at: DateTime<Utc>) -> Schedule {
        Schedule {
            updated_at: at,
            ..self
        }
    }
}
