use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Stored lifecycle status. "Overdue" is never stored; it is derived at
/// read time from the due date, window and wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Completed,
    Missed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Missed => "missed",
        }
    }

    pub fn from_str_name(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "completed" => Ok(AssignmentStatus::Completed),
            "missed" => Ok(AssignmentStatus::Missed),
            other => Err(DomainError::Deserialization(format!(
                "Unknown assignment status: {}",
                other
            ))),
        }
    }
}

/// Read-time status for listings, derived from stored state plus the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Pending,
    Completed,
    Overdue,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Pending => "pending",
            DisplayStatus::Completed => "completed",
            DisplayStatus::Overdue => "overdue",
        }
    }
}

/// Why a client marked a check-in missed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissedReason {
    Sick,
    Traveling,
    PersonalEmergency,
    Other,
}

impl MissedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissedReason::Sick => "sick",
            MissedReason::Traveling => "traveling",
            MissedReason::PersonalEmergency => "personal_emergency",
            MissedReason::Other => "other",
        }
    }

    pub fn from_str_name(s: &str) -> Result<Self, DomainError> {
        match s {
            "sick" => Ok(MissedReason::Sick),
            "traveling" => Ok(MissedReason::Traveling),
            "personal_emergency" => Ok(MissedReason::PersonalEmergency),
            "other" => Ok(MissedReason::Other),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown missed reason: {}",
                other
            ))),
        }
    }
}

/// One entry in an assignment's pause history. Pushed on pause, popped on
/// unpause; the history is an undo stack, not a free-form list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseRecord {
    pub pause_start: DateTime<Utc>,
    pub pause_end: DateTime<Utc>,
    pub pause_weeks: u32,
    pub paused_at: DateTime<Utc>,
}

/// Which recurrence strategy identifies "which week" an assignment
/// represents. Explicit at the API boundary so one component cannot create
/// duplicates under a strategy another component queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceKey {
    /// 1-based week index within the series, matched against `recurring_week`
    DueDateKeyed { week: u32 },
    /// Monday of the reflection week, matched against `reflection_week_start`
    WeekStartKeyed { week_start: NaiveDate },
}

impl RecurrenceKey {
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            RecurrenceKey::DueDateKeyed { week } => {
                if *week < 1 {
                    return Err(DomainError::Validation(
                        "Recurring week index is 1-based".to_string(),
                    ));
                }
            }
            RecurrenceKey::WeekStartKeyed { week_start } => {
                if week_start.weekday() != Weekday::Mon {
                    return Err(DomainError::Validation(format!(
                        "Week start must be a Monday: {}",
                        week_start
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_round_trip() {
        for status in [
            AssignmentStatus::Pending,
            AssignmentStatus::Completed,
            AssignmentStatus::Missed,
        ] {
            assert_eq!(
                AssignmentStatus::from_str_name(status.as_str()).unwrap(),
                status
            );
        }
        assert!(AssignmentStatus::from_str_name("overdue").is_err());
    }

    #[test]
    fn test_missed_reason_round_trip() {
        for reason in [
            MissedReason::Sick,
            MissedReason::Traveling,
            MissedReason::PersonalEmergency,
            MissedReason::Other,
        ] {
            assert_eq!(
                MissedReason::from_str_name(reason.as_str()).unwrap(),
                reason
            );
        }
        assert!(MissedReason::from_str_name("busy").is_err());
    }

    #[test]
    fn test_recurrence_key_validation() {
        assert!(RecurrenceKey::DueDateKeyed { week: 1 }.validate().is_ok());
        assert!(RecurrenceKey::DueDateKeyed { week: 0 }.validate().is_err());

        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        assert!(RecurrenceKey::WeekStartKeyed { week_start: monday }
            .validate()
            .is_ok());
        assert!(RecurrenceKey::WeekStartKeyed {
            week_start: tuesday
        }
        .validate()
        .is_err());
    }
}
