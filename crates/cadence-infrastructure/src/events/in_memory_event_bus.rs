use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use cadence_domain::events::{DomainEvent, EventBus};
use cadence_domain::shared::DomainError;

/// Event bus that logs and records published events in process.
/// Good enough for a single-node deployment and for asserting on
/// side effects in tests.
#[derive(Default)]
pub struct InMemoryEventBus {
    published: RwLock<Vec<String>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn published_count(&self) -> usize {
        self.published.read().await.len()
    }

    pub async fn published_types(&self) -> Vec<String> {
        self.published.read().await.clone()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let type_name = event.event_type_name();
        info!(event = type_name, "Domain event published");
        self.published.write().await.push(type_name.to_string());
        Ok(())
    }
}
