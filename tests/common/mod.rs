//! Common test utilities for integration tests
#![allow(dead_code)]

use tempfile::NamedTempFile;
use timetable::{CourseInput, Date, TimetableHandler};

/// A Monday in week 2 of the term created by `create_spring_schedule`
pub fn test_today() -> Date {
    Date::new(2025, 3, 10).unwrap()
}

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (TimetableHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = TimetableHandler::new(temp_file.path().to_str().unwrap())
        .unwrap()
        .with_today(test_today());
    (handler, temp_file)
}

/// Reopen the file behind `temp_file` with a fresh handler
pub fn reopen_handler(temp_file: &NamedTempFile) -> TimetableHandler {
    TimetableHandler::new(temp_file.path().to_str().unwrap())
        .unwrap()
        .with_today(test_today())
}

/// Extract the ID from a "... created with ID: <id>" response
pub fn extract_id_from_response(response: &str) -> String {
    let start = response.find("ID: ").expect("response has no ID") + 4;
    response[start..]
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string()
}

/// 16-week term starting Monday 2025-03-03, selected
pub fn create_spring_schedule(handler: &TimetableHandler) -> String {
    let response = handler
        .handle_new_schedule(
            "Spring 2025".to_string(),
            "2025-03-03".to_string(),
            None,
            Some(16),
            true,
        )
        .unwrap();
    extract_id_from_response(&response)
}

pub fn course_input(name: &str, weekday: &str, periods: &str, weeks: Option<&str>) -> CourseInput {
    CourseInput {
        name: Some(name.to_string()),
        weekday: Some(weekday.to_string()),
        periods: Some(periods.to_string()),
        weeks: weeks.map(str::to_string),
        ..Default::default()
    }
}

/// Add a course and return its ID
pub fn add_course(
    handler: &TimetableHandler,
    name: &str,
    weekday: &str,
    periods: &str,
    weeks: Option<&str>,
) -> String {
    let response = handler
        .handle_add_course(course_input(name, weekday, periods, weeks))
        .unwrap();
    extract_id_from_response(&response)
}
