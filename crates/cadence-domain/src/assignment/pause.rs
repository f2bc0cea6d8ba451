use chrono::{DateTime, Duration, Utc};

use super::aggregate::CheckInAssignment;
use super::value_objects::PauseRecord;
use crate::shared::DomainError;

/// Assignments touched by a pause, plus the answer the caller reports back
#[derive(Debug)]
pub struct PauseOutcome {
    /// Every assignment that must be persisted, as one atomic batch
    pub touched: Vec<CheckInAssignment>,
    /// How many due dates were shifted
    pub updated_count: usize,
    pub pause_end: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UnpauseOutcome {
    pub touched: Vec<CheckInAssignment>,
    pub updated_count: usize,
}

/// Shifts a series' future due dates forward/back by whole weeks.
///
/// The pause history on the series' base assignment is an undo stack:
/// pause pushes one record, unpause reverses exactly the top record.
/// Pure over a loaded series; the caller persists `touched` atomically.
pub struct PauseEngine;

impl PauseEngine {
    /// Shift every non-completed, not-yet-due assignment forward by
    /// `pause_weeks` weeks and record the pause on the base assignment.
    pub fn pause(
        mut series: Vec<CheckInAssignment>,
        pause_weeks: u32,
        now: DateTime<Utc>,
    ) -> Result<PauseOutcome, DomainError> {
        if series.is_empty() {
            return Err(DomainError::NotFound(
                "No assignments found for this series".to_string(),
            ));
        }
        if pause_weeks < 1 {
            return Err(DomainError::Validation(
                "Pause must be at least one week".to_string(),
            ));
        }

        let shift_days = pause_weeks as i64 * 7;
        let pause_end = now + Duration::days(shift_days);
        let base = Self::base_index(&series);

        let mut shifted = Vec::new();
        for (idx, assignment) in series.iter_mut().enumerate() {
            if assignment.is_completed() || assignment.due_date() < now {
                continue;
            }
            assignment.shift_due_date(shift_days)?;
            assignment.set_paused_until(Some(pause_end));
            shifted.push(idx);
        }

        series[base].push_pause_record(PauseRecord {
            pause_start: now,
            pause_end,
            pause_weeks,
            paused_at: now,
        });
        series[base].set_paused_until(Some(pause_end));

        let updated_count = shifted.len();
        Ok(PauseOutcome {
            touched: Self::collect(series, shifted, base),
            updated_count,
            pause_end,
        })
    }

    /// Reverse the most recent pause (LIFO). Fails when the series holds no
    /// pause history or is not currently paused.
    pub fn unpause(
        mut series: Vec<CheckInAssignment>,
        now: DateTime<Utc>,
    ) -> Result<UnpauseOutcome, DomainError> {
        if series.is_empty() {
            return Err(DomainError::NotFound(
                "No assignments found for this series".to_string(),
            ));
        }
        let base = Self::base_index(&series);

        if series[base].paused_until().is_none() {
            return Err(DomainError::InvalidState(
                "Series is not currently paused".to_string(),
            ));
        }
        let record = series[base].pop_pause_record().ok_or_else(|| {
            DomainError::InvalidState("No pause history to reverse".to_string())
        })?;
        let shift_days = record.pause_weeks as i64 * 7;

        let mut shifted = Vec::new();
        for (idx, assignment) in series.iter_mut().enumerate() {
            if assignment.is_completed() || assignment.due_date() < now {
                continue;
            }
            assignment.shift_due_date(-shift_days)?;
            assignment.set_paused_until(None);
            shifted.push(idx);
        }

        // The base stays paused if an earlier pause is still on the stack
        let remaining = series[base].last_pause_record().map(|r| r.pause_end);
        series[base].set_paused_until(remaining);

        let updated_count = shifted.len();
        Ok(UnpauseOutcome {
            touched: Self::collect(series, shifted, base),
            updated_count,
        })
    }

    /// The assignment carrying pause metadata: week 1, or else the first
    fn base_index(series: &[CheckInAssignment]) -> usize {
        series
            .iter()
            .position(|a| a.recurring_week() == 1)
            .unwrap_or(0)
    }

    fn collect(
        series: Vec<CheckInAssignment>,
        shifted: Vec<usize>,
        base: usize,
    ) -> Vec<CheckInAssignment> {
        series
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| shifted.contains(idx) || *idx == base)
            .map(|(_, a)| a)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AssignmentStatus;
    use crate::shared::{ClientId, CoachId, FormId, ResponseId};
    use chrono::Utc;

    fn at(s: &str) -> DateTime<Utc> {
        format!("{}:00Z", s).parse().unwrap()
    }

    fn assignment(week: u32, due: &str) -> CheckInAssignment {
        CheckInAssignment::new(
            ClientId::from_string("client-1"),
            CoachId::from_string("coach-1"),
            FormId::from_string("form-1"),
            "Weekly Reflection".to_string(),
            at(due),
            week,
            6,
            true,
        )
        .unwrap()
    }

    fn series() -> Vec<CheckInAssignment> {
        vec![
            assignment(1, "2026-01-05T09:00"),
            assignment(2, "2026-01-12T09:00"),
            assignment(3, "2026-01-19T09:00"),
        ]
    }

    #[test]
    fn test_pause_shifts_future_assignments() {
        let now = at("2026-01-01T00:00");
        let outcome = PauseEngine::pause(series(), 2, now).unwrap();

        assert_eq!(outcome.updated_count, 3);
        assert_eq!(outcome.pause_end, at("2026-01-15T00:00"));
        for a in &outcome.touched {
            assert_eq!(a.paused_until(), Some(outcome.pause_end));
        }
        let week1 = outcome
            .touched
            .iter()
            .find(|a| a.recurring_week() == 1)
            .unwrap();
        assert_eq!(week1.due_date(), at("2026-01-19T09:00"));
        assert_eq!(week1.pause_history().len(), 1);
        assert_eq!(week1.pause_history()[0].pause_weeks, 2);
    }

    #[test]
    fn test_pause_leaves_completed_and_past_untouched() {
        let mut s = series();
        s[0].submit(ResponseId::new(), at("2026-01-05T08:00")).unwrap();
        let original_completed_due = s[0].due_date();

        // Week 2 is already in the past relative to "now"
        let now = at("2026-01-13T00:00");
        let outcome = PauseEngine::pause(s, 1, now).unwrap();

        assert_eq!(outcome.updated_count, 1); // only week 3 shifts
        let week1 = outcome
            .touched
            .iter()
            .find(|a| a.recurring_week() == 1)
            .unwrap();
        assert_eq!(week1.due_date(), original_completed_due);
        assert!(week1.is_completed());
        // Base still records the pause even though its own date is frozen
        assert_eq!(week1.pause_history().len(), 1);
    }

    #[test]
    fn test_pause_requires_at_least_one_week() {
        let now = at("2026-01-01T00:00");
        assert!(matches!(
            PauseEngine::pause(series(), 0, now),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_pause_unpause_round_trip_restores_due_dates() {
        let original = series();
        let original_dues: Vec<_> = original.iter().map(|a| a.due_date()).collect();
        let now = at("2026-01-01T00:00");

        let paused = PauseEngine::pause(original, 3, now).unwrap().touched;
        let resumed = PauseEngine::unpause(paused, now).unwrap();

        assert_eq!(resumed.updated_count, 3);
        let mut dues: Vec<_> = resumed.touched.iter().map(|a| a.due_date()).collect();
        dues.sort();
        assert_eq!(dues, original_dues);

        let week1 = resumed
            .touched
            .iter()
            .find(|a| a.recurring_week() == 1)
            .unwrap();
        assert!(week1.pause_history().is_empty());
        assert_eq!(week1.paused_until(), None);
    }

    #[test]
    fn test_unpause_without_pause_fails() {
        let now = at("2026-01-01T00:00");
        assert!(matches!(
            PauseEngine::unpause(series(), now),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn test_stacked_pauses_reverse_lifo() {
        let now = at("2026-01-01T00:00");

        let first = PauseEngine::pause(series(), 2, now).unwrap();
        let second = PauseEngine::pause(first.touched, 1, now).unwrap();

        let week1 = second
            .touched
            .iter()
            .find(|a| a.recurring_week() == 1)
            .unwrap();
        assert_eq!(week1.pause_history().len(), 2);
        // Originally due 01-05, shifted 2w then 1w
        assert_eq!(week1.due_date(), at("2026-01-26T09:00"));

        // Unpause reverses only the one-week pause
        let resumed = PauseEngine::unpause(second.touched, now).unwrap();
        let week1 = resumed
            .touched
            .iter()
            .find(|a| a.recurring_week() == 1)
            .unwrap();
        assert_eq!(week1.due_date(), at("2026-01-19T09:00"));
        assert_eq!(week1.pause_history().len(), 1);
        // Base remains paused under the earlier two-week pause
        assert_eq!(week1.paused_until(), Some(first.pause_end));
        assert_eq!(week1.status(), AssignmentStatus::Pending);
    }

    #[test]
    fn test_pause_empty_series_is_not_found() {
        let now = Utc::now();
        assert!(matches!(
            PauseEngine::pause(Vec::new(), 1, now),
            Err(DomainError::NotFound(_))
        ));
    }
}
