mod assignment_events;

use async_trait::async_trait;
use std::any::Any;

use crate::shared::DomainError;

pub use assignment_events::{
    AssignmentCreated, AssignmentMissed, ExtensionGranted, ReopenRequested, ResponseSubmitted,
    SeriesDeleted, SeriesPaused, SeriesResumed,
};

/// Marker trait for domain events
pub trait DomainEvent: Send + Sync {
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    fn event_type_name(&self) -> &'static str;
}

/// Publication seam; the in-memory implementation lives in infrastructure
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}
