//! Formatting helper functions for timetable output

use crate::model::{Course, LessonTimePeriodInfo, LocalId, Range, Schedule, Settings, Weekday};

/// Full English weekday name
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekdays shown for a schedule, Monday first
pub fn displayed_weekdays(schedule: &Schedule) -> Vec<Weekday> {
    let mut days = vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];
    if schedule.display_weekends {
        days.extend([Weekday::Sat, Weekday::Sun]);
    }
    days
}

/// One-line description of where and when a course meets
pub fn describe_course(id: LocalId, course: &Course) -> String {
    format!(
        "- [{}] {} ({} periods {}, weeks {})",
        id,
        course.name,
        weekday_name(course.weekday),
        course.time,
        course.week
    )
}

/// Describe a course with its optional details on indented lines
pub fn format_course(id: LocalId, course: &Course) -> String {
    let mut result = describe_course(id, course);
    result.push('\n');
    if !course.teacher.is_empty() {
        result.push_str(&format!("  Teacher: {}\n", course.teacher));
    }
    if !course.classroom.is_empty() {
        result.push_str(&format!("  Classroom: {}\n", course.classroom));
    }
    if !course.note.is_empty() {
        result.push_str(&format!("  Note: {}\n", course.note));
    }
    result
}

/// List courses, optionally only those meeting in `week`
pub fn format_courses(schedule: &Schedule, week: Option<u32>) -> String {
    let mut courses: Vec<(&LocalId, &Course)> = schedule
        .courses
        .iter()
        .filter(|(_, c)| week.is_none_or(|w| c.is_in_week(w)))
        .collect();
    if courses.is_empty() {
        return "No courses found".to_string();
    }
    courses.sort_by_key(|(id, c)| (c.weekday.num_days_from_monday(), c.time, **id));

    let mut result = match week {
        Some(w) => format!("Found {} course(s) in week {}:\n\n", courses.len(), w),
        None => format!("Found {} course(s):\n\n", courses.len()),
    };
    for (id, course) in courses {
        result.push_str(&format_course(*id, course));
    }
    result
}

/// List the live schedules, marking the selected one
pub fn format_schedules(settings: &Settings) -> String {
    let schedules: Vec<(LocalId, &Schedule)> = settings.active_schedules().collect();
    if schedules.is_empty() {
        return "No schedules found".to_string();
    }
    let selected = settings.selected_schedule().map(|(id, _)| id);
    let mut result = format!("Found {} schedule(s):\n\n", schedules.len());
    for (id, schedule) in schedules {
        let marker = if Some(id) == selected { "*" } else { " " };
        result.push_str(&format!(
            "{} [{}] {} ({} to {}, {} weeks, {} course(s))\n",
            marker,
            id,
            schedule.name,
            schedule.term_start_date,
            schedule.term_end_date,
            schedule.total_weeks(),
            schedule.courses.len()
        ));
    }
    result
}

/// Describe one weekday: the slots meeting in `week`, then slots of other weeks
pub fn format_day(schedule: &Schedule, weekday: Weekday, week: u32) -> String {
    let slots = schedule.time_slots_for(weekday, week);
    if slots.all_ranges.is_empty() {
        return format!("No courses on {}", weekday_name(weekday));
    }

    let mut result = if schedule.is_in_term(week) {
        format!("{}, week {}:\n", weekday_name(weekday), week)
    } else {
        format!("{} (week {} is outside the term):\n", weekday_name(weekday), week)
    };

    let mut current: Vec<Range> = slots.current_week_ranges.iter().copied().collect();
    current.sort();
    for range in current {
        result.push_str(&format!("\nPeriods {}{}\n", range, period_times(schedule, &range)));
        for (id, course) in schedule.courses_at(&range, weekday, week) {
            result.push_str(&format!("  [{}] {}", id, course.name));
            if !course.classroom.is_empty() {
                result.push_str(&format!(" @ {}", course.classroom));
            }
            result.push('\n');
        }
    }

    if !slots.other_week_ranges.is_empty() {
        result.push_str("\nOther weeks:\n");
        for range in &slots.other_week_ranges {
            for (id, course) in schedule.other_week_courses_at(range, weekday, week) {
                result.push_str(&format!(
                    "  periods {}: [{}] {} (weeks {})\n",
                    range, id, course.name, course.week
                ));
            }
        }
    }
    result
}

/// Clock times covered by a period range, e.g. " (08:00-09:40)"
fn period_times(schedule: &Schedule, range: &Range) -> String {
    let info = &schedule.lesson_time_period_info;
    match (
        info.lesson_by_index(range.start()),
        info.lesson_by_index(range.end()),
    ) {
        (Ok(first), Ok(last)) => format!(" ({}-{})", first.start(), last.end()),
        _ => String::new(),
    }
}

/// Print the period table, flagging periods that overlap their predecessor
pub fn format_lessons(info: &LessonTimePeriodInfo) -> String {
    let conflicts = info.conflict_set();
    let mut result = format!("{} period(s):\n", info.total_lessons_count());
    let parts = [
        ("Morning", &info.morning),
        ("Afternoon", &info.afternoon),
        ("Evening", &info.evening),
    ];
    let mut index = 0usize;
    for (label, lessons) in parts {
        if lessons.is_empty() {
            continue;
        }
        result.push_str(&format!("\n{}:\n", label));
        for lesson in lessons {
            let warning = if conflicts.contains(&index) {
                "  (starts before the previous period ends)"
            } else {
                ""
            };
            result.push_str(&format!(
                "  {:>2}. {}-{}{}\n",
                index + 1,
                lesson.start(),
                lesson.end(),
                warning
            ));
            index += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Date, WeekList};

    fn schedule() -> Schedule {
        let start = Date::new(2025, 3, 1).unwrap();
        Schedule::new("Spring", start, start.add_weeks(16).unwrap())
    }

    fn id(value: u16) -> LocalId {
        LocalId::new(value).unwrap()
    }

    #[test]
    fn test_format_courses_empty() {
        assert_eq!(format_courses(&schedule(), None), "No courses found");
    }

    #[test]
    fn test_format_courses_filters_by_week() {
        let s = schedule()
            .with_course(
                id(1),
                Course::new(
                    "Physics",
                    Range::new(1, 2).unwrap(),
                    Weekday::Tue,
                    WeekList::from_weeks(1..=8),
                )
                .with_classroom("Lab 3"),
            )
            .unwrap();
        let all = format_courses(&s, None);
        assert!(all.contains("- [1] Physics (Tuesday periods 1-2, weeks 1-8)"));
        assert!(all.contains("  Classroom: Lab 3"));
        assert_eq!(format_courses(&s, Some(9)), "No courses found");
    }

    #[test]
    fn test_format_day_shows_current_and_other_weeks() {
        let s = schedule()
            .with_course(
                id(1),
                Course::new(
                    "Physics",
                    Range::new(1, 2).unwrap(),
                    Weekday::Mon,
                    WeekList::from_weeks(1..=8),
                ),
            )
            .unwrap()
            .with_course(
                id(2),
                Course::new(
                    "Chemistry",
                    Range::new(3, 4).unwrap(),
                    Weekday::Mon,
                    WeekList::from_weeks(9..=16),
                ),
            )
            .unwrap();
        let text = format_day(&s, Weekday::Mon, 2);
        assert!(text.contains("Periods 1-2 (08:00-09:40)"));
        assert!(text.contains("  [1] Physics"));
        assert!(text.contains("  periods 3-4: [2] Chemistry (weeks 9-16)"));
        assert_eq!(format_day(&s, Weekday::Fri, 2), "No courses on Friday");
    }

    #[test]
    fn test_format_lessons_flags_overlaps() {
        let mut info = LessonTimePeriodInfo::default();
        info.morning[1] = crate::model::Lesson::new(
            "08:30".parse().unwrap(),
            "09:15".parse().unwrap(),
        )
        .unwrap();
        let text = format_lessons(&info);
        assert!(text.contains(" 2. 08:30-09:15  (starts before the previous period ends)"));
        assert!(!text.contains(" 1. 08:00-08:45  (starts"));
    }

    #[test]
    fn test_displayed_weekdays() {
        assert_eq!(displayed_weekdays(&schedule()).len(), 5);
        assert_eq!(
            displayed_weekdays(&schedule().with_display_weekends(true)).len(),
            7
        );
    }
}
