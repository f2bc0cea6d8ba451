use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{AssignmentStatus, DisplayStatus, MissedReason, PauseRecord};
use crate::shared::{AssignmentId, ClientId, CoachId, DomainError, FormId, ResponseId};
use crate::window::{CheckInWindow, WindowEvaluator};

/// One occurrence of a recurring (or standalone) check-in for one client.
///
/// Completed occurrences are immutable with respect to scheduling fields
/// and survive every bulk operation on their series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInAssignment {
    id: AssignmentId,
    client_id: ClientId,
    coach_id: CoachId,
    form_id: FormId,
    form_title: String,
    due_date: DateTime<Utc>,
    due_time: Option<NaiveTime>,
    window: Option<CheckInWindow>,
    recurring_week: u32,
    total_weeks: u32,
    is_recurring: bool,
    reflection_week_start: Option<NaiveDate>,
    status: AssignmentStatus,
    response_id: Option<ResponseId>,
    completed_at: Option<DateTime<Utc>>,
    extension_granted: bool,
    extension_requested_at: Option<DateTime<Utc>>,
    extension_reason: Option<String>,
    reopen_requested_at: Option<DateTime<Utc>>,
    missed_at: Option<DateTime<Utc>>,
    missed_reason: Option<MissedReason>,
    missed_comment: Option<String>,
    paused_until: Option<DateTime<Utc>>,
    pause_history: Vec<PauseRecord>,
    created_at: DateTime<Utc>,
}

impl CheckInAssignment {
    /// A client may self-report a miss only this many full days past due
    pub const MISSED_GRACE_DAYS: i64 = 3;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: ClientId,
        coach_id: CoachId,
        form_id: FormId,
        form_title: String,
        due_date: DateTime<Utc>,
        recurring_week: u32,
        total_weeks: u32,
        is_recurring: bool,
    ) -> Result<Self, DomainError> {
        if form_title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Form title cannot be empty".to_string(),
            ));
        }
        if recurring_week < 1 {
            return Err(DomainError::Validation(
                "Recurring week index is 1-based".to_string(),
            ));
        }
        if total_weeks < recurring_week {
            return Err(DomainError::Validation(format!(
                "Week {} exceeds the {}-week series",
                recurring_week, total_weeks
            )));
        }

        Ok(Self {
            id: AssignmentId::new(),
            client_id,
            coach_id,
            form_id,
            form_title: form_title.trim().to_string(),
            due_date,
            due_time: None,
            window: None,
            recurring_week,
            total_weeks,
            is_recurring,
            reflection_week_start: None,
            status: AssignmentStatus::Pending,
            response_id: None,
            completed_at: None,
            extension_granted: false,
            extension_requested_at: None,
            extension_reason: None,
            reopen_requested_at: None,
            missed_at: None,
            missed_reason: None,
            missed_comment: None,
            paused_until: None,
            pause_history: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Builder for reconstructing an assignment from persistence
    pub fn builder(
        id: AssignmentId,
        client_id: ClientId,
        coach_id: CoachId,
        form_id: FormId,
        form_title: String,
        due_date: DateTime<Utc>,
    ) -> AssignmentBuilder {
        AssignmentBuilder::new(id, client_id, coach_id, form_id, form_title, due_date)
    }

    // Getters

    pub fn id(&self) -> &AssignmentId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn coach_id(&self) -> &CoachId {
        &self.coach_id
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    pub fn form_title(&self) -> &str {
        &self.form_title
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn due_time(&self) -> Option<NaiveTime> {
        self.due_time
    }

    pub fn window(&self) -> Option<&CheckInWindow> {
        self.window.as_ref()
    }

    pub fn recurring_week(&self) -> u32 {
        self.recurring_week
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    pub fn is_recurring(&self) -> bool {
        self.is_recurring
    }

    pub fn reflection_week_start(&self) -> Option<NaiveDate> {
        self.reflection_week_start
    }

    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    pub fn response_id(&self) -> Option<&ResponseId> {
        self.response_id.as_ref()
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn extension_granted(&self) -> bool {
        self.extension_granted
    }

    pub fn extension_requested_at(&self) -> Option<DateTime<Utc>> {
        self.extension_requested_at
    }

    pub fn extension_reason(&self) -> Option<&str> {
        self.extension_reason.as_deref()
    }

    pub fn reopen_requested_at(&self) -> Option<DateTime<Utc>> {
        self.reopen_requested_at
    }

    pub fn missed_at(&self) -> Option<DateTime<Utc>> {
        self.missed_at
    }

    pub fn missed_reason(&self) -> Option<MissedReason> {
        self.missed_reason
    }

    pub fn missed_comment(&self) -> Option<&str> {
        self.missed_comment.as_deref()
    }

    pub fn paused_until(&self) -> Option<DateTime<Utc>> {
        self.paused_until
    }

    pub fn pause_history(&self) -> &[PauseRecord] {
        &self.pause_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True once a response exists; completion is terminal
    pub fn is_completed(&self) -> bool {
        self.status == AssignmentStatus::Completed
            || self.response_id.is_some()
            || self.completed_at.is_some()
    }

    /// Read-time status for listings. Never mutates; an extension grant
    /// suppresses the derived overdue state.
    pub fn display_status(&self, evaluator: &WindowEvaluator, now: DateTime<Utc>) -> DisplayStatus {
        if self.is_completed() {
            return DisplayStatus::Completed;
        }
        if self.status == AssignmentStatus::Missed {
            return DisplayStatus::Overdue;
        }
        if self.extension_granted {
            return DisplayStatus::Pending;
        }
        if evaluator.is_overdue(self.window.as_ref(), self.due_date, now) {
            DisplayStatus::Overdue
        } else {
            DisplayStatus::Pending
        }
    }

    // Lifecycle transitions

    /// Record the client's response. Legal from pending or missed;
    /// re-submission against a completed assignment is rejected.
    pub fn submit(
        &mut self,
        response_id: ResponseId,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::AlreadyCompleted(format!(
                "Check-in {} has already been submitted",
                self.id
            )));
        }
        self.status = AssignmentStatus::Completed;
        self.response_id = Some(response_id);
        self.completed_at = Some(now);
        Ok(())
    }

    /// Client self-reports a missed check-in. Only the owning client, only
    /// from a state that is neither completed nor missed, only once the
    /// assignment is at least [`Self::MISSED_GRACE_DAYS`] full days past due.
    pub fn mark_missed(
        &mut self,
        actor: &ClientId,
        reason: MissedReason,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if actor != &self.client_id {
            return Err(DomainError::PermissionDenied(
                "Only the assigned client may mark a check-in missed".to_string(),
            ));
        }
        if self.is_completed() {
            return Err(DomainError::InvalidState(
                "A completed check-in cannot be marked missed".to_string(),
            ));
        }
        if self.status == AssignmentStatus::Missed {
            return Err(DomainError::InvalidState(
                "Check-in is already marked missed".to_string(),
            ));
        }
        let comment = comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        if reason == MissedReason::Other && comment.is_none() {
            return Err(DomainError::Validation(
                "A comment is required when the reason is 'other'".to_string(),
            ));
        }
        let days_overdue = now.signed_duration_since(self.due_date).num_days();
        if days_overdue < Self::MISSED_GRACE_DAYS {
            return Err(DomainError::InvalidState(format!(
                "Check-in must be at least {} days overdue before it can be marked missed ({} so far)",
                Self::MISSED_GRACE_DAYS,
                days_overdue.max(0)
            )));
        }

        self.status = AssignmentStatus::Missed;
        self.missed_at = Some(now);
        self.missed_reason = Some(reason);
        self.missed_comment = comment;
        Ok(())
    }

    /// Coach/admin override: open a missed or overdue check-in back up for
    /// submission. A missed assignment returns to pending; audit fields from
    /// the miss are retained. Caller authorization happens in the
    /// application layer, which knows who is asking.
    pub fn grant_extension(
        &mut self,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::AlreadyCompleted(format!(
                "Check-in {} is already completed and cannot be reopened",
                self.id
            )));
        }
        if self.status == AssignmentStatus::Missed {
            self.status = AssignmentStatus::Pending;
        }
        self.extension_granted = true;
        self.extension_requested_at = Some(now);
        self.extension_reason = reason.filter(|r| !r.trim().is_empty());
        Ok(())
    }

    /// Client asks the coach to reopen a missed/overdue check-in. Stamps the
    /// request; the status itself does not change here.
    pub fn request_reopen(
        &mut self,
        actor: &ClientId,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if actor != &self.client_id {
            return Err(DomainError::PermissionDenied(
                "Only the assigned client may request a reopen".to_string(),
            ));
        }
        if self.is_completed() {
            return Err(DomainError::AlreadyCompleted(
                "This check-in has already been completed".to_string(),
            ));
        }
        if self.status != AssignmentStatus::Missed {
            if self.due_date >= now {
                return Err(DomainError::InvalidState(
                    "Check-in is still open; submit it instead of requesting a reopen"
                        .to_string(),
                ));
            }
            if self.extension_granted {
                return Err(DomainError::InvalidState(
                    "Check-in has already been reopened by your coach".to_string(),
                ));
            }
        }
        self.reopen_requested_at = Some(now);
        Ok(())
    }

    /// Key this occurrence by its reflection week (week-start recurrence)
    pub fn set_reflection_week_start(&mut self, week_start: NaiveDate) {
        self.reflection_week_start = Some(week_start);
    }

    /// Attach or replace the submission window
    pub fn set_window(&mut self, window: Option<CheckInWindow>) {
        self.window = window;
    }

    // Scheduling mutations used by the pause engine

    /// Shift the due date by whole days. Completed assignments are immutable
    /// with respect to scheduling fields.
    pub fn shift_due_date(&mut self, days: i64) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::InvalidState(
                "Cannot reschedule a completed check-in".to_string(),
            ));
        }
        self.due_date += chrono::Duration::days(days);
        Ok(())
    }

    pub fn set_paused_until(&mut self, paused_until: Option<DateTime<Utc>>) {
        self.paused_until = paused_until;
    }

    pub fn push_pause_record(&mut self, record: PauseRecord) {
        self.pause_history.push(record);
    }

    pub fn pop_pause_record(&mut self) -> Option<PauseRecord> {
        self.pause_history.pop()
    }

    pub fn last_pause_record(&self) -> Option<&PauseRecord> {
        self.pause_history.last()
    }
}

/// Builder used when restoring assignments from storage
pub struct AssignmentBuilder {
    assignment: CheckInAssignment,
}

impl AssignmentBuilder {
    pub fn new(
        id: AssignmentId,
        client_id: ClientId,
        coach_id: CoachId,
        form_id: FormId,
        form_title: String,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            assignment: CheckInAssignment {
                id,
                client_id,
                coach_id,
                form_id,
                form_title,
                due_date,
                due_time: None,
                window: None,
                recurring_week: 1,
                total_weeks: 1,
                is_recurring: false,
                reflection_week_start: None,
                status: AssignmentStatus::Pending,
                response_id: None,
                completed_at: None,
                extension_granted: false,
                extension_requested_at: None,
                extension_reason: None,
                reopen_requested_at: None,
                missed_at: None,
                missed_reason: None,
                missed_comment: None,
                paused_until: None,
                pause_history: Vec::new(),
                created_at: Utc::now(),
            },
        }
    }

    pub fn due_time(mut self, due_time: Option<NaiveTime>) -> Self {
        self.assignment.due_time = due_time;
        self
    }

    pub fn window(mut self, window: Option<CheckInWindow>) -> Self {
        self.assignment.window = window;
        self
    }

    pub fn recurring_week(mut self, recurring_week: u32) -> Self {
        self.assignment.recurring_week = recurring_week;
        self
    }

    pub fn total_weeks(mut self, total_weeks: u32) -> Self {
        self.assignment.total_weeks = total_weeks;
        self
    }

    pub fn is_recurring(mut self, is_recurring: bool) -> Self {
        self.assignment.is_recurring = is_recurring;
        self
    }

    pub fn reflection_week_start(mut self, week_start: Option<NaiveDate>) -> Self {
        self.assignment.reflection_week_start = week_start;
        self
    }

    pub fn status(mut self, status: AssignmentStatus) -> Self {
        self.assignment.status = status;
        self
    }

    pub fn response_id(mut self, response_id: Option<ResponseId>) -> Self {
        self.assignment.response_id = response_id;
        self
    }

    pub fn completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.assignment.completed_at = completed_at;
        self
    }

    pub fn extension_granted(mut self, extension_granted: bool) -> Self {
        self.assignment.extension_granted = extension_granted;
        self
    }

    pub fn extension_requested_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.assignment.extension_requested_at = at;
        self
    }

    pub fn extension_reason(mut self, reason: Option<String>) -> Self {
        self.assignment.extension_reason = reason;
        self
    }

    pub fn reopen_requested_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.assignment.reopen_requested_at = at;
        self
    }

    pub fn missed_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.assignment.missed_at = at;
        self
    }

    pub fn missed_reason(mut self, reason: Option<MissedReason>) -> Self {
        self.assignment.missed_reason = reason;
        self
    }

    pub fn missed_comment(mut self, comment: Option<String>) -> Self {
        self.assignment.missed_comment = comment;
        self
    }

    pub fn paused_until(mut self, paused_until: Option<DateTime<Utc>>) -> Self {
        self.assignment.paused_until = paused_until;
        self
    }

    pub fn pause_history(mut self, pause_history: Vec<PauseRecord>) -> Self {
        self.assignment.pause_history = pause_history;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.assignment.created_at = created_at;
        self
    }

    pub fn build(self) -> CheckInAssignment {
        self.assignment
    }
}
