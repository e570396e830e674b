//! Schedule and preference handler tests
mod common;

use common::*;
use timetable::model::ThemeMode;

#[test]
fn test_first_schedule_is_selected() {
    let (handler, _temp_file) = get_test_handler();
    let response = handler
        .handle_new_schedule(
            "Spring 2025".to_string(),
            "2025-03-03".to_string(),
            None,
            Some(16),
            false,
        )
        .unwrap();
    assert!(response.starts_with("Schedule created with ID: "));
    assert!(response.contains("16 weeks, 2025-03-03 to 2025-06-22"));
    assert!(response.ends_with(", selected"));

    let id = extract_id_from_response(&response);
    let settings = handler.snapshot().unwrap();
    assert_eq!(settings.selected_schedule_id.unwrap().to_string(), id);
}

#[test]
fn test_second_schedule_selected_only_on_request() {
    let (handler, _temp_file) = get_test_handler();
    let first = create_spring_schedule(&handler);
    let response = handler
        .handle_new_schedule(
            "Autumn 2025".to_string(),
            "2025-09-01".to_string(),
            Some("2025-12-21".to_string()),
            None,
            false,
        )
        .unwrap();
    assert!(!response.ends_with(", selected"));
    let second = extract_id_from_response(&response);

    let list = handler.handle_list_schedules().unwrap();
    assert!(list.starts_with("Found 2 schedule(s):"));
    assert!(list.contains(&format!("* [{}] Spring 2025", first)));
    assert!(list.contains(&format!("  [{}] Autumn 2025", second)));

    let response = handler.handle_select_schedule(second.clone()).unwrap();
    assert_eq!(response, format!("Selected schedule {} (Autumn 2025)", second));
    let list = handler.handle_list_schedules().unwrap();
    assert!(list.contains(&format!("* [{}] Autumn 2025", second)));
}

#[test]
fn test_new_schedule_rejects_bad_terms() {
    let (handler, _temp_file) = get_test_handler();
    let result = handler.handle_new_schedule(
        "Broken".to_string(),
        "2025-03-03".to_string(),
        Some("2025-01-01".to_string()),
        None,
        false,
    );
    assert!(result.unwrap_err().to_string().contains("is before its start"));

    let result = handler.handle_new_schedule(
        "   ".to_string(),
        "2025-03-03".to_string(),
        None,
        Some(4),
        false,
    );
    assert!(result.is_err());

    let result =
        handler.handle_new_schedule("Broken".to_string(), "March".to_string(), None, Some(4), false);
    assert!(result.unwrap_err().to_string().contains("Invalid date format"));
    assert_eq!(handler.handle_list_schedules().unwrap(), "No schedules found");
}

#[test]
fn test_new_schedule_with_huge_week_count_is_rejected() {
    let (handler, _temp_file) = get_test_handler();
    let err = handler
        .handle_new_schedule(
            "Forever".to_string(),
            "2025-03-03".to_string(),
            None,
            Some(20_000_000),
            false,
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "A term can last at most 1000 weeks, got 20000000");
    assert_eq!(handler.handle_list_schedules().unwrap(), "No schedules found");
}

#[test]
fn test_remove_selected_schedule_clears_selection() {
    let (handler, _temp_file) = get_test_handler();
    let id = create_spring_schedule(&handler);

    let response = handler.handle_remove_schedule(id.clone()).unwrap();
    assert_eq!(response, format!("Schedule {} removed", id));
    assert_eq!(handler.handle_list_schedules().unwrap(), "No schedules found");

    let settings = handler.snapshot().unwrap();
    assert!(settings.selected_schedule_id.is_none());
    // Removed schedules stay in the file, marked deleted
    assert_eq!(settings.schedules.len(), 1);

    let err = handler.handle_select_schedule(id).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_commands_without_schedule_explain_what_to_do() {
    let (handler, _temp_file) = get_test_handler();
    let err = handler.handle_list_courses(None).unwrap_err();
    assert!(err.to_string().contains("new-schedule"));

    let id = create_spring_schedule(&handler);
    handler.handle_remove_schedule(id).unwrap();
    handler
        .handle_new_schedule(
            "Autumn".to_string(),
            "2025-09-01".to_string(),
            None,
            Some(4),
            false,
        )
        .unwrap();
    // The new schedule becomes the selection since none was selected
    assert!(handler.handle_list_courses(None).is_ok());
}

#[test]
fn test_invalid_id_is_rejected() {
    let (handler, _temp_file) = get_test_handler();
    assert!(handler.handle_select_schedule("abc".to_string()).is_err());
    assert!(handler.handle_remove_schedule("0".to_string()).is_err());
}

#[test]
fn test_theme_and_weekends_persist() {
    let (handler, temp_file) = get_test_handler();
    create_spring_schedule(&handler);

    assert_eq!(
        handler.handle_set_theme("Dark".to_string()).unwrap(),
        "Theme set to dark"
    );
    assert!(handler.handle_set_theme("sepia".to_string()).is_err());
    assert!(handler.handle_set_weekends(true).unwrap().contains("shown"));

    let reopened = reopen_handler(&temp_file);
    let settings = reopened.snapshot().unwrap();
    assert_eq!(settings.theme_mode, ThemeMode::dark);
    let (_, schedule) = settings.selected_schedule().unwrap();
    assert!(schedule.display_weekends);

    let week = reopened.handle_week(None).unwrap();
    assert!(week.contains("No courses on Sunday"));
}
