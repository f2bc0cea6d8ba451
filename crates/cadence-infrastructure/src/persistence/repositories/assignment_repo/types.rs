use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json;
use sqlx::FromRow;

use crate::persistence::RepositoryErrorMapper;
use cadence_domain::assignment::{
    AssignmentStatus, CheckInAssignment, MissedReason, PauseRecord,
};
use cadence_domain::shared::{
    AssignmentId, ClientId, CoachId, DomainError, FormId, ResponseId,
};
use cadence_domain::window::CheckInWindow;

#[derive(FromRow)]
pub(super) struct AssignmentRow {
    pub id: String,
    pub client_id: String,
    pub coach_id: String,
    pub form_id: String,
    pub form_title: String,
    pub due_date: DateTime<Utc>,
    pub due_time: Option<NaiveTime>,
    pub check_in_window: Option<String>,
    pub recurring_week: i64,
    pub total_weeks: i64,
    pub is_recurring: bool,
    pub reflection_week_start: Option<NaiveDate>,
    pub status: String,
    pub response_id: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub extension_granted: bool,
    pub extension_requested_at: Option<DateTime<Utc>>,
    pub extension_reason: Option<String>,
    pub reopen_requested_at: Option<DateTime<Utc>>,
    pub missed_at: Option<DateTime<Utc>>,
    pub missed_reason: Option<String>,
    pub missed_comment: Option<String>,
    pub paused_until: Option<DateTime<Utc>>,
    pub pause_history: String,
    pub created_at: DateTime<Utc>,
}

impl AssignmentRow {
    #[allow(clippy::wrong_self_convention)]
    pub fn to_assignment(self) -> Result<CheckInAssignment, DomainError> {
        let window: Option<CheckInWindow> = self
            .check_in_window
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Deserialize check-in window"))?;

        let pause_history: Vec<PauseRecord> = serde_json::from_str(&self.pause_history)
            .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Deserialize pause history"))?;

        let status = AssignmentStatus::from_str_name(&self.status)?;
        let missed_reason = self
            .missed_reason
            .as_deref()
            .map(MissedReason::from_str_name)
            .transpose()?;

        Ok(CheckInAssignment::builder(
            AssignmentId::from_string(&self.id),
            ClientId::from_string(&self.client_id),
            CoachId::from_string(&self.coach_id),
            FormId::from_string(&self.form_id),
            self.form_title,
            self.due_date,
        )
        .due_time(self.due_time)
        .window(window)
        .recurring_week(self.recurring_week as u32)
        .total_weeks(self.total_weeks as u32)
        .is_recurring(self.is_recurring)
        .reflection_week_start(self.reflection_week_start)
        .status(status)
        .response_id(self.response_id.as_deref().map(ResponseId::from_string))
        .completed_at(self.completed_at)
        .extension_granted(self.extension_granted)
        .extension_requested_at(self.extension_requested_at)
        .extension_reason(self.extension_reason)
        .reopen_requested_at(self.reopen_requested_at)
        .missed_at(self.missed_at)
        .missed_reason(missed_reason)
        .missed_comment(self.missed_comment)
        .paused_until(self.paused_until)
        .pause_history(pause_history)
        .created_at(self.created_at)
        .build())
    }
}
