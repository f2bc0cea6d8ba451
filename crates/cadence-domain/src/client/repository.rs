use async_trait::async_trait;

use super::aggregate::Client;
use crate::shared::{ClientId, DomainError};

/// Client repository trait
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Save (insert or update) a client
    async fn save(&self, client: &Client) -> Result<(), DomainError>;

    /// Find a client by primary document id
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Find a client by auth-provider id
    async fn find_by_auth_id(&self, auth_id: &str) -> Result<Option<Client>, DomainError>;

    /// All clients coached by the given coach
    async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<Client>, DomainError>;
}
