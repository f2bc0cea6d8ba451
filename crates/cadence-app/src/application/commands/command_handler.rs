use async_trait::async_trait;

use cadence_domain::shared::DomainError;

/// One handler per command type
#[async_trait]
pub trait CommandHandler<C>: Send + Sync {
    type Result;

    async fn handle(&self, command: C) -> Result<Self::Result, DomainError>;
}
