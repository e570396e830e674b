//! Command handlers for the timetable
//!
//! Each group of commands is in a separate file. Every handler takes raw
//! string arguments, validates them, and returns a human-readable reply.

pub mod courses;
pub mod preferences;
pub mod queries;
pub mod schedules;
