//! Validation helper functions for timetable commands
//!
//! Turns raw command arguments into model values, with error messages that
//! list the accepted forms.

use crate::model::{Date, LocalId, MAX_WEEK, Range, ThemeMode, WeekList, WeekParity, Weekday};
use anyhow::{Result, anyhow};

/// Parse a weekday given as a name ("mon", "Monday") or number (1 = Monday .. 7 = Sunday)
pub fn parse_weekday(weekday_str: &str) -> Result<Weekday> {
    let trimmed = weekday_str.trim();
    let by_number = match trimmed {
        "1" => Some(Weekday::Mon),
        "2" => Some(Weekday::Tue),
        "3" => Some(Weekday::Wed),
        "4" => Some(Weekday::Thu),
        "5" => Some(Weekday::Fri),
        "6" => Some(Weekday::Sat),
        "7" => Some(Weekday::Sun),
        _ => None,
    };
    by_number
        .or_else(|| trimmed.parse::<Weekday>().ok())
        .ok_or_else(|| {
            anyhow!(
                "Invalid weekday '{}'. Use a name (mon, tuesday, ...) or a number 1-7 (1 = Monday)",
                weekday_str
            )
        })
}

/// Parse a period range such as "3-4" or "5"
pub fn parse_range(range_str: &str) -> Result<Range> {
    range_str.parse::<Range>().map_err(|_| {
        anyhow!(
            "Invalid periods '{}'. Use a single period (e.g., '3') or an inclusive range (e.g., '3-4')",
            range_str
        )
    })
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<Date> {
    date_str.parse::<Date>().map_err(|_| {
        anyhow!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-01')",
            date_str
        )
    })
}

/// Parse a week list such as "1-8, 10, 12-16"
pub fn parse_week_list(weeks_str: &str) -> Result<WeekList> {
    let list = WeekList::parse(weeks_str).map_err(|_| {
        anyhow!(
            "Invalid weeks '{}'. Use comma-separated weeks and ranges (e.g., '1-8, 10, 12-16')",
            weeks_str
        )
    })?;
    if list.is_empty() {
        return Err(anyhow!("Week list must contain at least one week"));
    }
    Ok(list)
}

pub fn parse_week_parity(parity_str: &str) -> Result<WeekParity> {
    parity_str
        .trim()
        .to_lowercase()
        .parse::<WeekParity>()
        .map_err(|e| anyhow!(e))
}

pub fn parse_theme_mode(theme_str: &str) -> Result<ThemeMode> {
    theme_str
        .trim()
        .to_lowercase()
        .parse::<ThemeMode>()
        .map_err(|e| anyhow!(e))
}

/// Parse a course or schedule id
pub fn parse_local_id(id_str: &str) -> Result<LocalId> {
    id_str.parse::<LocalId>().map_err(|e| anyhow!(e))
}

/// Check that a term length fits the week numbering
pub fn check_term_weeks(total_weeks: u32) -> Result<()> {
    if total_weeks > MAX_WEEK {
        return Err(anyhow!(
            "A term can last at most {} weeks, got {}",
            MAX_WEEK,
            total_weeks
        ));
    }
    Ok(())
}

/// Check that every week lies inside a term of `total_weeks` weeks
pub fn check_weeks_in_term(week: &WeekList, total_weeks: u32) -> Result<()> {
    let outside: Vec<u32> = week
        .sorted()
        .into_iter()
        .filter(|w| *w > total_weeks)
        .collect();
    if outside.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Weeks {} are outside the term (1-{})",
            WeekList::from_weeks(outside),
            total_weeks
        ))
    }
}
