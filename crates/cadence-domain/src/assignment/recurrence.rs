use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::aggregate::CheckInAssignment;
use super::value_objects::{AssignmentStatus, RecurrenceKey};
use crate::shared::DomainError;

/// Pure recurrence rules: which existing assignment answers for a given
/// week, and how to synthesize the occurrence when none exists yet.
/// Loading and persisting the series is the application layer's job.
pub struct RecurrencePlanner;

impl RecurrencePlanner {
    /// Hour of day (UTC) a synthesized occurrence falls due
    pub const DEFAULT_DUE_HOUR: u32 = 9;

    /// Find the assignment that already represents the requested week.
    /// The search step is mandatory before any create step.
    pub fn find_for_week<'a>(
        assignments: &'a [CheckInAssignment],
        key: &RecurrenceKey,
    ) -> Option<&'a CheckInAssignment> {
        match key {
            RecurrenceKey::WeekStartKeyed { week_start } => assignments
                .iter()
                .find(|a| a.reflection_week_start() == Some(*week_start)),
            RecurrenceKey::DueDateKeyed { week } => assignments
                .iter()
                .find(|a| a.reflection_week_start().is_none() && a.recurring_week() == *week),
        }
    }

    /// Due-date keyed "next occurrence": the pending assignment with the
    /// nearest future due date.
    pub fn next_pending<'a>(
        assignments: &'a [CheckInAssignment],
        now: DateTime<Utc>,
    ) -> Option<&'a CheckInAssignment> {
        assignments
            .iter()
            .filter(|a| a.status() == AssignmentStatus::Pending && a.due_date() >= now)
            .min_by_key(|a| a.due_date())
    }

    /// The series' first assignment, used as the template for synthesized
    /// occurrences.
    pub fn template<'a>(assignments: &'a [CheckInAssignment]) -> Option<&'a CheckInAssignment> {
        assignments
            .iter()
            .min_by_key(|a| (a.recurring_week(), a.due_date()))
    }

    /// Due date for a synthesized week-keyed occurrence: the Monday
    /// following the requested week, at `due_hour`.
    pub fn due_date_for_week(week_start: NaiveDate, due_hour: u32) -> DateTime<Utc> {
        (week_start + Duration::weeks(1))
            .and_hms_opt(due_hour, 0, 0)
            .unwrap_or_else(|| (week_start + Duration::weeks(1)).and_hms_opt(9, 0, 0).unwrap())
            .and_utc()
    }

    /// Build the missing occurrence for `week_start` from the series
    /// template. Copies coach, title, series length and recurrence flag;
    /// the new occurrence starts pending with no window of its own.
    pub fn synthesize(
        template: &CheckInAssignment,
        week_start: NaiveDate,
        due_hour: u32,
    ) -> Result<CheckInAssignment, DomainError> {
        RecurrenceKey::WeekStartKeyed { week_start }.validate()?;

        let mut assignment = CheckInAssignment::new(
            template.client_id().clone(),
            template.coach_id().clone(),
            template.form_id().clone(),
            template.form_title().to_string(),
            Self::due_date_for_week(week_start, due_hour),
            1,
            template.total_weeks().max(1),
            template.is_recurring(),
        )?;
        assignment.set_reflection_week_start(week_start);
        Ok(assignment)
    }
}
