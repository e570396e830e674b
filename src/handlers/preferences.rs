//! Display preferences: theme and weekend columns

use crate::TimetableHandler;
use crate::validation;
use anyhow::Result;
use chrono::Utc;

impl TimetableHandler {
    pub fn handle_set_theme(&self, theme: String) -> Result<String> {
        let theme_mode = validation::parse_theme_mode(&theme)?;
        let mut data = self.lock()?;
        let updated = data.with_theme_mode(theme_mode);
        self.commit(&mut data, updated)?;
        Ok(format!("Theme set to {:?}", theme_mode))
    }

    /// Show or hide Saturday and Sunday for the selected schedule
    pub fn handle_set_weekends(&self, display_weekends: bool) -> Result<String> {
        let mut data = self.lock()?;
        let (schedule_id, schedule) = Self::selected(&data)?;
        let updated_schedule = schedule
            .with_display_weekends(display_weekends)
            .touched(Utc::now());
        let updated = data.with_schedule(schedule_id, updated_schedule);
        self.commit(&mut data, updated)?;
        Ok(format!(
            "Weekends are now {} for schedule {}",
            if display_weekends { "shown" } else { "hidden" },
            schedule_id
        ))
    }
}
