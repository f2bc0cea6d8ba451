use async_trait::async_trait;

use super::message::CoachMessage;
use crate::shared::DomainError;

/// Delivery seam for coach-bound messages
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &CoachMessage) -> Result<(), DomainError>;
}
