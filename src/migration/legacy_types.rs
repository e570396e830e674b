//! Legacy data types for migration support
//!
//! Version 1 files held a single schedule at the top level of the document,
//! with courses stored as a flat `[[courses]]` array. These types exist only
//! to read such files.

use crate::model::Date;
use serde::Deserialize;

/// A course as written by version 1
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCourse {
    /// Course name (legacy: also accepts "title")
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub teacher: Option<String>,
    /// Room (legacy: also accepts "room")
    #[serde(default, alias = "room")]
    pub classroom: Option<String>,
    /// 1 = Monday .. 7 = Sunday
    pub weekday: u8,
    pub start_period: u32,
    pub end_period: u32,
    pub weeks: LegacyWeeks,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Week lists were written either as an integer array or as run-length text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LegacyWeeks {
    List(Vec<u32>),
    Text(String),
}

/// The single schedule a version 1 file describes
#[derive(Debug, Clone)]
pub struct LegacySchedule {
    pub name: String,
    pub term_start_date: Date,
    pub total_weeks: u32,
    pub courses: Vec<LegacyCourse>,
}
