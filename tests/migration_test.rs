//! Tests for reading older and current data files
//!
//! These tests verify that version 1 files are upgraded on load and that the
//! current format reads back unchanged.

mod common;

use common::*;
use std::fs;
use timetable::model::Weekday;
use timetable::migration::{legacy_weekday, normalize_string_line_endings, settings_from_toml};
use timetable::{Storage, model::CURRENT_FORMAT_VERSION};

const LEGACY_TOML: &str = r#"
name = "Spring 2024"
term_start_date = "2024-02-26"
total_weeks = 18

[[courses]]
title = "Linear Algebra"
room = "A101"
weekday = 1
start_period = 1
end_period = 2
weeks = [1, 2, 3, 4]

[[courses]]
name = "Databases"
weekday = 3
start_period = 3
end_period = 4
weeks = "1-9, 11"
note = "Lab\r\nbring laptop"
"#;

#[test]
fn test_legacy_file_is_migrated() {
    let settings = settings_from_toml(LEGACY_TOML).unwrap();
    assert_eq!(settings.format_version, CURRENT_FORMAT_VERSION);
    assert_eq!(settings.schedules.len(), 1);

    let (_, schedule) = settings.selected_schedule().unwrap();
    assert_eq!(schedule.name, "Spring 2024");
    assert_eq!(schedule.total_weeks(), 18);
    assert_eq!(schedule.courses.len(), 2);

    let algebra = schedule
        .courses
        .values()
        .find(|c| c.name == "Linear Algebra")
        .unwrap();
    assert_eq!(algebra.classroom, "A101");
    assert_eq!(algebra.weekday, Weekday::Mon);
    assert_eq!(algebra.week.to_string(), "1-4");

    let databases = schedule
        .courses
        .values()
        .find(|c| c.name == "Databases")
        .unwrap();
    assert_eq!(databases.weekday, Weekday::Wed);
    assert_eq!(databases.time.to_string(), "3-4");
    assert_eq!(databases.week.len(), 10);
    assert_eq!(databases.note, "Lab\nbring laptop");
}

#[test]
fn test_legacy_file_with_bad_weekday_fails() {
    let content = r#"
term_start_date = "2024-02-26"

[[courses]]
name = "Nowhere"
weekday = 9
start_period = 1
end_period = 1
weeks = [1]
"#;
    let err = settings_from_toml(content).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid weekday"));
}

#[test]
fn test_legacy_weeks_outside_term_are_dropped_and_file_reloads() {
    let content = r#"
term_start_date = "2024-02-26"
total_weeks = 16

[[courses]]
name = "Seminar"
weekday = 2
start_period = 1
end_period = 1
weeks = [0, 1, 2, 17]
"#;
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), content).unwrap();

    let storage = Storage::new(temp_file.path());
    let settings = storage.load().unwrap();
    let (_, schedule) = settings.selected_schedule().unwrap();
    let seminar = schedule.courses.values().next().unwrap();
    assert_eq!(seminar.week.to_string(), "1-2");

    storage.save(&settings).unwrap();
    assert_eq!(storage.load().unwrap(), settings);
}

#[test]
fn test_legacy_file_with_huge_term_fails_cleanly() {
    let content = r#"
term_start_date = "2024-02-26"
total_weeks = 20000000
"#;
    let err = settings_from_toml(content).unwrap_err();
    assert!(err.to_string().contains("longer than the supported 1000 weeks"));
}

#[test]
fn test_current_file_with_huge_week_range_fails_cleanly() {
    let (handler, temp_file) = get_test_handler();
    create_spring_schedule(&handler);
    add_course(&handler, "Physics", "mon", "1-2", Some("1-8"));

    let content = fs::read_to_string(temp_file.path()).unwrap();
    let crafted = content.replace("week = \"1-8\"", "week = \"1-4000000000\"");
    assert_ne!(crafted, content);
    let err = settings_from_toml(&crafted).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid week list"));
}

#[test]
fn test_newer_format_is_rejected() {
    let err = settings_from_toml("format_version = 3\n").unwrap_err();
    assert!(err.to_string().contains("Unsupported format_version 3"));
}

#[test]
fn test_empty_document_gives_empty_settings() {
    let settings = settings_from_toml("").unwrap();
    assert!(settings.schedules.is_empty());
    assert!(settings.selected_schedule_id.is_none());
}

#[test]
fn test_current_format_reads_back_unchanged() {
    let (handler, temp_file) = get_test_handler();
    create_spring_schedule(&handler);
    add_course(&handler, "Physics", "mon", "1-2", Some("1-8, 10"));
    add_course(&handler, "Chemistry", "fri", "5", None);

    let content = fs::read_to_string(temp_file.path()).unwrap();
    let reread = settings_from_toml(&content).unwrap();
    assert_eq!(reread, handler.snapshot().unwrap());
}

#[test]
fn test_storage_upgrades_legacy_file_on_save() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), LEGACY_TOML).unwrap();

    let storage = Storage::new(temp_file.path());
    let settings = storage.load().unwrap();
    storage.save(&settings).unwrap();

    let content = fs::read_to_string(temp_file.path()).unwrap();
    assert!(content.contains("format_version = 2"));
    assert!(!content.contains("start_period"));
    assert_eq!(storage.load().unwrap(), settings);
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path().join("timetable.toml"));
    let settings = storage.load().unwrap();
    assert!(settings.schedules.is_empty());
}

#[test]
fn test_legacy_weekday_numbers() {
    assert_eq!(legacy_weekday(1).unwrap(), Weekday::Mon);
    assert_eq!(legacy_weekday(7).unwrap(), Weekday::Sun);
    assert!(legacy_weekday(0).is_err());
}

#[test]
fn test_normalize_string_line_endings() {
    assert_eq!(normalize_string_line_endings("hello\r\nworld"), "hello\nworld");
    assert_eq!(normalize_string_line_endings("hello\rworld"), "hello\nworld");
    assert_eq!(normalize_string_line_endings("hello\nworld"), "hello\nworld");
}
