//! Schedule entry domain entity

use chrono::{Duration, NaiveTime};
use uuid::Uuid;

use crate::shared::errors::{DomainError, DomainResult};

/// Number of schedule slots in a week (0 = Sunday .. 6 = Saturday)
pub const DAYS_PER_WEEK: u8 = 7;

/// Status of a single weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Open,
    Closed,
    Holiday,
}

impl Default for DayStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Holiday => "Holiday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "holiday" => Some(Self::Holiday),
            _ => None,
        }
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Midday closure inside the opening hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Opening configuration of one weekday.
///
/// Hours never cross midnight: `open_time < close_time` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub restaurant_id: Uuid,
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday
    pub day_of_week: u8,
    pub status: DayStatus,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub break_window: Option<BreakWindow>,
    pub notes: Option<String>,
}

fn time_of_day(hours: i64) -> NaiveTime {
    NaiveTime::MIN.overflowing_add_signed(Duration::hours(hours)).0
}

impl ScheduleEntry {
    pub fn new(
        restaurant_id: Uuid,
        day_of_week: u8,
        status: DayStatus,
        open_time: NaiveTime,
        close_time: NaiveTime,
    ) -> DomainResult<Self> {
        let entry = Self {
            restaurant_id,
            day_of_week,
            status,
            open_time,
            close_time,
            break_window: None,
            notes: None,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Open 09:00 - 22:00 without a break
    pub fn default_for_day(restaurant_id: Uuid, day_of_week: u8) -> Self {
        Self {
            restaurant_id,
            day_of_week,
            status: DayStatus::Open,
            open_time: time_of_day(9),
            close_time: time_of_day(22),
            break_window: None,
            notes: None,
        }
    }

    pub fn default_week(restaurant_id: Uuid) -> Vec<Self> {
        (0..DAYS_PER_WEEK)
            .map(|day| Self::default_for_day(restaurant_id, day))
            .collect()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.day_of_week >= DAYS_PER_WEEK {
            return Err(DomainError::validation(format!(
                "day_of_week {} is outside 0..=6",
                self.day_of_week
            )));
        }
        if self.open_time >= self.close_time {
            return Err(DomainError::validation(format!(
                "open time {} must be before close time {}",
                self.open_time.format("%H:%M"),
                self.close_time.format("%H:%M")
            )));
        }
        if let Some(window) = self.break_window {
            check_break(self.open_time, self.close_time, window)?;
        }
        Ok(())
    }

    pub fn set_break(&mut self, start: NaiveTime, end: NaiveTime) -> DomainResult<()> {
        let window = BreakWindow { start, end };
        check_break(self.open_time, self.close_time, window)?;
        self.break_window = Some(window);
        Ok(())
    }

    pub fn remove_break(&mut self) {
        self.break_window = None;
    }

    /// Whether this day is open at `time`.
    ///
    /// Opening and closing instants are both inclusive. With a break the
    /// restaurant closes at `break.start` and is open again at `break.end`.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.status != DayStatus::Open {
            return false;
        }

        match self.break_window {
            None => time >= self.open_time && time <= self.close_time,
            Some(window) => {
                (time >= self.open_time && time < window.start)
                    || (time >= window.end && time <= self.close_time)
            }
        }
    }

    pub fn formatted_hours(&self) -> String {
        match self.status {
            DayStatus::Closed => return "Closed".to_string(),
            DayStatus::Holiday => return "Holiday".to_string(),
            DayStatus::Open => {}
        }

        let mut hours = format!(
            "{} - {}",
            self.open_time.format("%H:%M"),
            self.close_time.format("%H:%M")
        );
        if let Some(window) = self.break_window {
            hours.push_str(&format!(
                " (Break: {} - {})",
                window.start.format("%H:%M"),
                window.end.format("%H:%M")
            ));
        }
        hours
    }
}

fn check_break(open: NaiveTime, close: NaiveTime, window: BreakWindow) -> DomainResult<()> {
    if window.start >= window.end {
        return Err(DomainError::validation(
            "break start time must be before break end time",
        ));
    }
    if window.start < open || window.end > close {
        return Err(DomainError::validation(
            "break time must be within opening hours",
        ));
    }
    Ok(())
}

/// Validate a full replacement set: every entry valid, at most one per day.
pub fn validate_week(entries: &[ScheduleEntry]) -> DomainResult<()> {
    let mut seen = [false; DAYS_PER_WEEK as usize];
    for entry in entries {
        entry.validate()?;
        let slot = &mut seen[entry.day_of_week as usize];
        if *slot {
            return Err(DomainError::validation(format!(
                "duplicate schedule entry for day {}",
                entry.day_of_week
            )));
        }
        *slot = true;
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn nine_to_ten() -> ScheduleEntry {
        ScheduleEntry::default_for_day(Uuid::new_v4(), 1)
    }

    #[test]
    fn default_week_covers_every_day() {
        let week = ScheduleEntry::default_week(Uuid::new_v4());
        assert_eq!(week.len(), 7);
        for (day, entry) in week.iter().enumerate() {
            assert_eq!(entry.day_of_week as usize, day);
            assert_eq!(entry.status, DayStatus::Open);
            assert_eq!(entry.open_time, t(9, 0));
            assert_eq!(entry.close_time, t(22, 0));
            assert!(entry.break_window.is_none());
        }
        assert!(validate_week(&week).is_ok());
    }

    #[test]
    fn opening_bounds_are_inclusive() {
        let e = nine_to_ten();
        assert!(!e.is_open_at(t(8, 59)));
        assert!(e.is_open_at(t(9, 0)));
        assert!(e.is_open_at(t(22, 0)));
        assert!(!e.is_open_at(t(22, 1)));
    }

    #[test]
    fn break_closes_at_start_and_reopens_at_end() {
        let mut e = nine_to_ten();
        e.set_break(t(12, 0), t(13, 0)).unwrap();
        assert!(e.is_open_at(t(11, 59)));
        assert!(!e.is_open_at(t(12, 0)));
        assert!(!e.is_open_at(t(12, 59)));
        assert!(e.is_open_at(t(13, 0)));
        assert!(e.is_open_at(t(22, 0)));
    }

    #[test]
    fn holiday_and_closed_days_never_open() {
        for status in [DayStatus::Holiday, DayStatus::Closed] {
            let mut e = nine_to_ten();
            e.status = status;
            for h in 0..24 {
                assert!(!e.is_open_at(t(h, 0)), "{} open at {}:00", status, h);
            }
        }
    }

    #[test]
    fn rejects_inverted_hours() {
        let err = ScheduleEntry::new(Uuid::new_v4(), 2, DayStatus::Open, t(22, 0), t(2, 0));
        assert!(matches!(err, Err(DomainError::Validation(_))));

        let err = ScheduleEntry::new(Uuid::new_v4(), 2, DayStatus::Open, t(9, 0), t(9, 0));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_day_out_of_range() {
        let err = ScheduleEntry::new(Uuid::new_v4(), 7, DayStatus::Open, t(9, 0), t(17, 0));
        assert!(err.is_err());
    }

    #[test]
    fn break_must_sit_inside_opening_hours() {
        let mut e = nine_to_ten();
        assert!(e.set_break(t(8, 0), t(10, 0)).is_err());
        assert!(e.set_break(t(21, 0), t(23, 0)).is_err());
        assert!(e.set_break(t(13, 0), t(12, 0)).is_err());
        assert!(e.set_break(t(12, 0), t(12, 0)).is_err());
        assert!(e.break_window.is_none());

        // touching the opening hours is allowed
        assert!(e.set_break(t(9, 0), t(22, 0)).is_ok());
        e.remove_break();
        assert!(e.break_window.is_none());
    }

    #[test]
    fn duplicate_days_are_rejected() {
        let id = Uuid::new_v4();
        let week = vec![
            ScheduleEntry::default_for_day(id, 3),
            ScheduleEntry::default_for_day(id, 3),
        ];
        assert!(validate_week(&week).is_err());
    }

    #[test]
    fn formatted_hours() {
        let mut e = nine_to_ten();
        assert_eq!(e.formatted_hours(), "09:00 - 22:00");
        e.set_break(t(14, 0), t(16, 30)).unwrap();
        assert_eq!(e.formatted_hours(), "09:00 - 22:00 (Break: 14:00 - 16:30)");
        e.status = DayStatus::Holiday;
        assert_eq!(e.formatted_hours(), "Holiday");
        e.status = DayStatus::Closed;
        assert_eq!(e.formatted_hours(), "Closed");
    }

    #[test]
    fn day_status_parse() {
        assert_eq!(DayStatus::parse("holiday"), Some(DayStatus::Holiday));
        assert_eq!(DayStatus::parse("Open"), Some(DayStatus::Open));
        assert_eq!(DayStatus::parse("weekend"), None);
    }
}
