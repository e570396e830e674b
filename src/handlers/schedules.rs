//! Schedule handlers: create, list, select, remove

use crate::TimetableHandler;
use crate::formatting;
use crate::model::{Date, Schedule};
use crate::validation;
use anyhow::{Result, bail};

impl TimetableHandler {
    /// List every schedule that has not been removed
    pub fn handle_list_schedules(&self) -> Result<String> {
        let data = self.lock()?;
        Ok(formatting::format_schedules(&data))
    }

    /// Create a schedule for a term given by its start and either an end date or a length in weeks
    pub fn handle_new_schedule(
        &self,
        name: String,
        start: String,
        end: Option<String>,
        weeks: Option<u32>,
        select: bool,
    ) -> Result<String> {
        let name = name.trim().to_string();
        if name.is_empty() {
            bail!("Schedule name must not be empty");
        }
        let term_start_date = validation::parse_date(&start)?;
        let term_end_date = resolve_term_end(&term_start_date, end, weeks)?;

        let mut data = self.lock()?;
        let schedule = Schedule::new(name.clone(), term_start_date, term_end_date);
        let total_weeks = schedule.total_weeks();
        let (mut updated, id) = data.add_schedule(schedule)?;
        // The first schedule is always selected
        if select || !data.is_schedule_selected() {
            updated = updated.with_selected(id)?;
        }
        let selected = updated.selected_schedule_id == Some(id);
        self.commit(&mut data, updated)?;
        log::info!("created schedule {} '{}'", id, name);

        Ok(format!(
            "Schedule created with ID: {} ({} weeks, {} to {}){}",
            id,
            total_weeks,
            term_start_date,
            term_end_date,
            if selected { ", selected" } else { "" }
        ))
    }

    pub fn handle_select_schedule(&self, id: String) -> Result<String> {
        let id = validation::parse_local_id(&id)?;
        let mut data = self.lock()?;
        let updated = match data.with_selected(id) {
            Ok(updated) => updated,
            Err(_) => bail!(
                "Schedule '{}' does not exist. Use schedules to see available schedules.",
                id
            ),
        };
        let name = updated.schedules[&id].name.clone();
        self.commit(&mut data, updated)?;
        Ok(format!("Selected schedule {} ({})", id, name))
    }

    /// Mark a schedule deleted; its data stays in the file
    pub fn handle_remove_schedule(&self, id: String) -> Result<String> {
        let id = validation::parse_local_id(&id)?;
        let mut data = self.lock()?;
        let updated = match data.without_schedule(id) {
            Ok(updated) => updated,
            Err(_) => bail!(
                "Schedule '{}' does not exist. Use schedules to see available schedules.",
                id
            ),
        };
        self.commit(&mut data, updated)?;
        Ok(format!("Schedule {} removed", id))
    }
}

/// Term end from either an explicit date or a number of weeks
fn resolve_term_end(start: &Date, end: Option<String>, weeks: Option<u32>) -> Result<Date> {
    match (end, weeks) {
        (Some(_), Some(_)) => bail!("Give either an end date or a number of weeks, not both"),
        (None, None) => bail!("A term needs an end date (--end) or a length in weeks (--weeks)"),
        (None, Some(0)) => bail!("A term must last at least one week"),
        (None, Some(weeks)) => {
            validation::check_term_weeks(weeks)?;
            Ok(start.add_weeks(weeks)?)
        }
        (Some(end), None) => {
            let end = validation::parse_date(&end)?;
            if end < *start {
                bail!("Term end {} is before its start {}", end, start);
            }
            validation::check_term_weeks(start.weeks_till(&end))?;
            Ok(end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_WEEK;

    fn start() -> Date {
        Date::new(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_resolve_term_end_from_weeks() {
        let end = resolve_term_end(&start(), None, Some(16)).unwrap();
        assert_eq!(start().weeks_till(&end), 16);
    }

    #[test]
    fn test_resolve_term_end_from_date() {
        let end = resolve_term_end(&start(), Some("2025-07-01".to_string()), None).unwrap();
        assert_eq!(end, Date::new(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_resolve_term_end_errors() {
        assert!(resolve_term_end(&start(), None, None).is_err());
        assert!(resolve_term_end(&start(), None, Some(0)).is_err());
        assert!(resolve_term_end(&start(), Some("2025-07-01".to_string()), Some(3)).is_err());
        assert!(resolve_term_end(&start(), Some("2025-02-01".to_string()), None).is_err());
    }

    #[test]
    fn test_resolve_term_end_rejects_overlong_terms() {
        let err = resolve_term_end(&start(), None, Some(20_000_000)).unwrap_err();
        assert_eq!(err.to_string(), "A term can last at most 1000 weeks, got 20000000");
        assert!(resolve_term_end(&start(), None, Some(u32::MAX)).is_err());
        assert!(resolve_term_end(&start(), Some("9999-12-31".to_string()), None).is_err());
        assert!(resolve_term_end(&start(), None, Some(MAX_WEEK)).is_ok());
    }
}
