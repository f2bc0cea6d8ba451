use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Recurring weekly submission window, anchored to the due date's week.
/// When disabled, the check-in is always open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInWindow {
    pub enabled: bool,
    pub start_day: Weekday,
    pub start_time: NaiveTime,
    pub end_day: Weekday,
    pub end_time: NaiveTime,
}

impl CheckInWindow {
    pub fn new(
        enabled: bool,
        start_day: Weekday,
        start_time: NaiveTime,
        end_day: Weekday,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            enabled,
            start_day,
            start_time,
            end_day,
            end_time,
        }
    }

    /// Build a window from the stored string form (weekday names + "HH:MM")
    pub fn parse(
        enabled: bool,
        start_day: &str,
        start_time: &str,
        end_day: &str,
        end_time: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            enabled,
            start_day: parse_weekday(start_day)?,
            start_time: parse_hhmm(start_time)?,
            end_day: parse_weekday(end_day)?,
            end_time: parse_hhmm(end_time)?,
        })
    }

    /// A window that never restricts submission
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            start_day: Weekday::Mon,
            start_time: NaiveTime::MIN,
            end_day: Weekday::Sun,
            end_time: NaiveTime::MIN,
        }
    }
}

/// Result of evaluating a window against wall-clock time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub is_open: bool,
    pub message: String,
}

impl WindowState {
    pub fn open(message: impl Into<String>) -> Self {
        Self {
            is_open: true,
            message: message.into(),
        }
    }

    pub fn closed(message: impl Into<String>) -> Self {
        Self {
            is_open: false,
            message: message.into(),
        }
    }
}

/// How weekday names map onto concrete instants around a due date.
///
/// The source data was tuned ad hoc ("Friday before, Monday after"), so the
/// anchor rule is configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowAnchorConfig {
    /// First day of the anchor week
    pub week_start: Weekday,
    /// Whole-week shift applied to the resolved window start
    pub start_week_offset: i64,
    /// Whole-week shift applied to the resolved window end
    pub end_week_offset: i64,
}

impl Default for WindowAnchorConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            start_week_offset: 0,
            end_week_offset: 0,
        }
    }
}

impl WindowAnchorConfig {
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_start_week_offset(mut self, weeks: i64) -> Self {
        self.start_week_offset = weeks;
        self
    }

    pub fn with_end_week_offset(mut self, weeks: i64) -> Self {
        self.end_week_offset = weeks;
        self
    }
}

/// Parse a weekday name ("Friday", "fri", case-insensitive)
pub fn parse_weekday(s: &str) -> Result<Weekday, DomainError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| DomainError::InvalidInput(format!("Invalid weekday name: {}", s)))
}

/// Parse a local wall-clock time in "HH:MM" form
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M:%S"))
        .map_err(|_| DomainError::InvalidInput(format!("Invalid time, expected HH:MM: {}", s)))
}
