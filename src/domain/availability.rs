//! Whether a restaurant can serve an order at a given moment
//!
//! Three independent signals feed into this: the restaurant status, the
//! order-acceptance flag and the weekly schedule. The schedule lookup alone is
//! exposed separately because the catalog reports it on its own.

use chrono::{Datelike, NaiveDateTime};

use crate::domain::restaurant::{Restaurant, RestaurantStatus};
use crate::domain::schedule::ScheduleEntry;

/// 0 = Sunday .. 6 = Saturday
pub fn day_of_week(at: NaiveDateTime) -> u8 {
    at.weekday().num_days_from_sunday() as u8
}

/// Schedule-only check. A day with no entry is closed.
pub fn is_scheduled_open(schedule: &[ScheduleEntry], at: NaiveDateTime) -> bool {
    let day = day_of_week(at);
    schedule
        .iter()
        .find(|e| e.day_of_week == day)
        .map(|e| e.is_open_at(at.time()))
        .unwrap_or(false)
}

/// Snapshot of the three availability signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub is_active: bool,
    pub is_accepting_orders: bool,
    pub is_scheduled_open: bool,
}

impl Availability {
    pub fn of(restaurant: &Restaurant, at: NaiveDateTime) -> Self {
        Self {
            is_active: restaurant.status == RestaurantStatus::Active,
            is_accepting_orders: restaurant.is_accepting_orders,
            is_scheduled_open: is_scheduled_open(&restaurant.schedule, at),
        }
    }

    /// Open for business: active, accepting orders and within scheduled hours
    pub fn is_available(&self) -> bool {
        self.is_active && self.is_accepting_orders && self.is_scheduled_open
    }
}

pub fn is_available(restaurant: &Restaurant, at: NaiveDateTime) -> bool {
    Availability::of(restaurant, at).is_available()
}

// ── Tests ──────────────────────────────────────────────────────
