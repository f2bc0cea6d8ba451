use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cadence_domain::assignment::{MissedReason, RecurrenceKey};

/// Resolve (find or lazily create) the occurrence for one week of a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveWeekCommand {
    /// Client document id or auth-provider id
    pub client_ref: String,
    pub form_id: String,
    pub key: RecurrenceKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveWeekResult {
    pub assignment_id: String,
    /// Whether this call created the occurrence
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseCommand {
    pub assignment_id: String,
    pub client_ref: String,
    pub response_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseResult {
    pub assignment_id: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkMissedCommand {
    pub assignment_id: String,
    pub client_ref: String,
    pub reason: MissedReason,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkMissedResult {
    pub assignment_id: String,
}

/// Coach/admin override reopening a missed or overdue check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenForCheckInCommand {
    pub assignment_id: String,
    pub acting_user_id: String,
    /// Admins may open any assignment; coaches only their own clients'
    pub is_admin: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenForCheckInResult {
    pub assignment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestReopenCommand {
    pub assignment_id: String,
    pub client_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestReopenResult {
    pub assignment_id: String,
    /// Inbox message delivered to the coach
    pub message_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseSeriesCommand {
    pub client_ref: String,
    pub form_id: String,
    pub pause_weeks: u32,
    pub acting_coach_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseSeriesResult {
    pub updated_count: usize,
    pub pause_end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpauseSeriesCommand {
    pub client_ref: String,
    pub form_id: String,
    pub acting_coach_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpauseSeriesResult {
    pub updated_count: usize,
}

/// Delete a series' open occurrences; completed ones are always preserved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSeriesCommand {
    pub client_ref: String,
    pub form_id: String,
    pub coach_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSeriesResult {
    pub deleted_count: usize,
    pub preserved_count: usize,
}
