use super::error::ModelError;
use super::local_id::{LocalId, allocate_local_id, keyed_map};
use super::schedule::Schedule;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Format version written by this build
pub const CURRENT_FORMAT_VERSION: u32 = 2;

/// Preferred color scheme, stored for the UI
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    system,
    light,
    dark,
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(ThemeMode::system),
            "light" => Ok(ThemeMode::light),
            "dark" => Ok(ThemeMode::dark),
            _ => Err(format!(
                "Invalid theme mode '{}'. Valid options are: system, light, dark",
                s
            )),
        }
    }
}

/// Aggregate root: every schedule plus the user's selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_schedule_id: Option<LocalId>,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default, with = "keyed_map")]
    pub schedules: std::collections::BTreeMap<LocalId, Schedule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            selected_schedule_id: None,
            theme_mode: ThemeMode::default(),
            schedules: Default::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the selection points at an existing, non-deleted schedule
    pub fn is_schedule_selected(&self) -> bool {
        self.selected_schedule().is_some()
    }

    pub fn selected_schedule(&self) -> Option<(LocalId, &Schedule)> {
        let id = self.selected_schedule_id?;
        self.schedules
            .get(&id)
            .filter(|schedule| !schedule.deleted)
            .map(|schedule| (id, schedule))
    }

    /// Schedules that have not been deleted
    pub fn active_schedules(&self) -> impl Iterator<Item = (LocalId, &Schedule)> {
        self.schedules
            .iter()
            .filter(|(_, schedule)| !schedule.deleted)
            .map(|(id, schedule)| (*id, schedule))
    }

    pub fn new_schedule_id(&self) -> Result<LocalId, ModelError> {
        self.new_schedule_id_with(&mut rand::thread_rng())
    }

    pub fn new_schedule_id_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LocalId, ModelError> {
        allocate_local_id(rng, |id| self.schedules.contains_key(&id))
    }

    /// Insert or replace the schedule stored under `id`
    pub fn with_schedule(&self, id: LocalId, schedule: Schedule) -> Settings {
        let mut schedules = self.schedules.clone();
        schedules.insert(id, schedule);
        Settings {
            schedules,
            ..self.clone()
        }
    }

    /// Store `schedule` under a freshly allocated id
    pub fn add_schedule(&self, schedule: Schedule) -> Result<(Settings, LocalId), ModelError> {
        self.add_schedule_with(schedule, &mut rand::thread_rng())
    }

    pub fn add_schedule_with<R: Rng + ?Sized>(
        &self,
        schedule: Schedule,
        rng: &mut R,
    ) -> Result<(Settings, LocalId), ModelError> {
        let id = self.new_schedule_id_with(rng)?;
        Ok((self.with_schedule(id, schedule), id))
    }

    /// Select a schedule; deleted or unknown schedules cannot be selected
    pub fn with_selected(&self, id: LocalId) -> Result<Settings, ModelError> {
        match self.schedules.get(&id) {
            Some(schedule) if !schedule.deleted => Ok(Settings {
                selected_schedule_id: Some(id),
                ..self.clone()
            }),
            _ => Err(ModelError::ScheduleNotFound(id)),
        }
    }

    pub fn with_theme_mode(&self, theme_mode: ThemeMode) -> Settings {
        Settings {
            theme_mode,
            ..self.clone()
        }
    }

    /// Soft-delete a schedule, dropping the selection if it pointed there
    pub fn without_schedule(&self, id: LocalId) -> Result<Settings, ModelError> {
        let schedule = self
            .schedules
            .get(&id)
            .filter(|schedule| !schedule.deleted)
            .ok_or(ModelError::ScheduleNotFound(id))?;
        let settings = self.with_schedule(id, schedule.with_deleted(true));
        let selected_schedule_id = settings.selected_schedule_id.filter(|selected| *selected != id);
        Ok(Settings {
            selected_schedule_id,
            ..settings
        })
    }
}
