//! Read-only views of the selected schedule

use crate::TimetableHandler;
use crate::formatting;
use crate::model::WeekList;
use crate::validation;
use anyhow::Result;

impl TimetableHandler {
    /// Weeks in which the slot `periods` on `weekday` is still free
    ///
    /// `exclude` names a course whose own weeks should count as free, as when editing it.
    pub fn handle_valid_weeks(
        &self,
        weekday: String,
        periods: String,
        exclude: Option<String>,
    ) -> Result<String> {
        let weekday = validation::parse_weekday(&weekday)?;
        let time = validation::parse_range(&periods)?;
        let exclude = exclude
            .as_deref()
            .map(validation::parse_local_id)
            .transpose()?;

        let data = self.lock()?;
        let (_, schedule) = Self::selected(&data)?;
        let valid = schedule.valid_weeks_for(&time, weekday, exclude);
        let total = schedule.total_weeks();
        if valid.is_empty() {
            return Ok(format!(
                "No free weeks for {} periods {} (term has {} weeks)",
                formatting::weekday_name(weekday),
                time,
                total
            ));
        }
        Ok(format!(
            "Free weeks for {} periods {}: {} ({} of {})",
            formatting::weekday_name(weekday),
            time,
            WeekList::from_weeks(valid.iter().copied()),
            valid.len(),
            total
        ))
    }

    /// Slot view of one weekday; `week` defaults to the current week
    pub fn handle_day(&self, weekday: String, week: Option<u32>) -> Result<String> {
        let weekday = validation::parse_weekday(&weekday)?;
        let data = self.lock()?;
        let (_, schedule) = Self::selected(&data)?;
        let week = week.unwrap_or_else(|| self.current_week(schedule));
        Ok(formatting::format_day(schedule, weekday, week))
    }

    /// Slot view of every displayed weekday
    pub fn handle_week(&self, week: Option<u32>) -> Result<String> {
        let data = self.lock()?;
        let (_, schedule) = Self::selected(&data)?;
        let week = week.unwrap_or_else(|| self.current_week(schedule));
        let mut result = if schedule.is_in_term(week) {
            format!("{}: week {} of {}\n", schedule.name, week, schedule.total_weeks())
        } else {
            format!(
                "{}: week {} is outside the term (1-{})\n",
                schedule.name,
                week,
                schedule.total_weeks()
            )
        };
        for weekday in formatting::displayed_weekdays(schedule) {
            result.push('\n');
            result.push_str(&formatting::format_day(schedule, weekday, week));
            if !result.ends_with('\n') {
                result.push('\n');
            }
        }
        Ok(result)
    }

    /// Period table of the selected schedule
    pub fn handle_lessons(&self) -> Result<String> {
        let data = self.lock()?;
        let (_, schedule) = Self::selected(&data)?;
        Ok(formatting::format_lessons(&schedule.lesson_time_period_info))
    }
}
