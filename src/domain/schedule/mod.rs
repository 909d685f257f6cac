//! Weekly schedule aggregate
//!
//! Contains the ScheduleEntry entity, the open/closed evaluation for a single
//! day, and the schedule repository interface.

pub mod model;
pub mod repository;

pub use model::{validate_week, BreakWindow, DayStatus, ScheduleEntry, DAYS_PER_WEEK};
pub use repository::ScheduleRepository;
