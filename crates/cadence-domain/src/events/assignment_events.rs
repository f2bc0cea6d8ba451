use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::assignment::MissedReason;
use crate::events::DomainEvent;
use crate::shared::{AssignmentId, ClientId, CoachId, FormId, ResponseId};

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Fired when the recurrence resolver lazily creates a week's occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCreated {
    pub assignment_id: AssignmentId,
    pub client_id: ClientId,
    pub form_id: FormId,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(AssignmentCreated);

/// Fired when a client submits a response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSubmitted {
    pub assignment_id: AssignmentId,
    pub client_id: ClientId,
    pub response_id: ResponseId,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(ResponseSubmitted);

/// Fired when a client marks a check-in missed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentMissed {
    pub assignment_id: AssignmentId,
    pub client_id: ClientId,
    pub reason: MissedReason,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(AssignmentMissed);

/// Audit record for a coach/admin "open for check-in" override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionGranted {
    pub assignment_id: AssignmentId,
    pub client_id: ClientId,
    pub granted_by: String,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(ExtensionGranted);

/// Fired when a client asks their coach to reopen a missed/overdue item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReopenRequested {
    pub assignment_id: AssignmentId,
    pub client_id: ClientId,
    pub coach_id: CoachId,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(ReopenRequested);

/// Fired after a series pause has been applied atomically
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPaused {
    pub client_id: ClientId,
    pub form_id: FormId,
    pub pause_weeks: u32,
    pub pause_end: DateTime<Utc>,
    pub updated_count: usize,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(SeriesPaused);

/// Fired after the most recent pause has been reversed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesResumed {
    pub client_id: ClientId,
    pub form_id: FormId,
    pub updated_count: usize,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(SeriesResumed);

/// Fired after a coach deletes a series (completed occurrences preserved)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDeleted {
    pub client_id: ClientId,
    pub form_id: FormId,
    pub deleted_count: usize,
    pub preserved_count: usize,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(SeriesDeleted);
