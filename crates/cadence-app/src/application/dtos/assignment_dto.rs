use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cadence_domain::assignment::CheckInAssignment;
use cadence_domain::window::WindowEvaluator;

/// Read model for a single check-in occurrence. `status` is the derived
/// display status, never the raw stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDto {
    pub id: String,
    pub client_id: String,
    pub coach_id: String,
    pub form_id: String,
    pub form_title: String,
    pub due_date: String,
    pub recurring_week: u32,
    pub total_weeks: u32,
    pub is_recurring: bool,
    pub reflection_week_start: Option<String>,
    pub status: String,
    pub is_window_open: bool,
    pub window_message: String,
    pub completed_at: Option<String>,
    pub missed_reason: Option<String>,
    pub extension_granted: bool,
    pub paused_until: Option<String>,
}

/// Maps an assignment aggregate to its DTO at a given instant
pub struct AssignmentDtoMapper<'a> {
    assignment: &'a CheckInAssignment,
    evaluator: &'a WindowEvaluator,
    now: DateTime<Utc>,
}

impl<'a> AssignmentDtoMapper<'a> {
    pub fn new(assignment: &'a CheckInAssignment, evaluator: &'a WindowEvaluator) -> Self {
        Self {
            assignment,
            evaluator,
            now: Utc::now(),
        }
    }

    pub fn with_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn to_dto(self) -> AssignmentDto {
        let a = self.assignment;

        let window_state = match a.window() {
            Some(window) => self.evaluator.evaluate(window, a.due_date(), self.now),
            None => cadence_domain::window::WindowState::open("Check-in is open"),
        };

        AssignmentDto {
            id: a.id().as_str().to_string(),
            client_id: a.client_id().as_str().to_string(),
            coach_id: a.coach_id().as_str().to_string(),
            form_id: a.form_id().as_str().to_string(),
            form_title: a.form_title().to_string(),
            due_date: a.due_date().to_rfc3339(),
            recurring_week: a.recurring_week(),
            total_weeks: a.total_weeks(),
            is_recurring: a.is_recurring(),
            reflection_week_start: a.reflection_week_start().map(|d| d.to_string()),
            status: a.display_status(self.evaluator, self.now).as_str().to_string(),
            is_window_open: window_state.is_open,
            window_message: window_state.message,
            completed_at: a.completed_at().map(|t| t.to_rfc3339()),
            missed_reason: a.missed_reason().map(|r| r.as_str().to_string()),
            extension_granted: a.extension_granted(),
            paused_until: a.paused_until().map(|t| t.to_rfc3339()),
        }
    }
}
