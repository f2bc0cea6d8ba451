use std::sync::Arc;

use cadence_domain::client::{Client, ClientRepository};
use cadence_domain::shared::{ClientId, DomainError};

/// A resolved client plus every id assignments may be stored under.
///
/// Historical data references clients by document id or by auth-provider
/// id interchangeably; repository queries must span both.
#[derive(Debug, Clone)]
pub struct ClientAliases {
    pub client: Client,
    ids: Vec<ClientId>,
}

impl ClientAliases {
    fn new(client: Client) -> Self {
        let mut ids = vec![client.id().clone()];
        if let Some(auth_id) = client.auth_id() {
            let alias = ClientId::from_string(auth_id);
            if alias != ids[0] {
                ids.push(alias);
            }
        }
        Self { client, ids }
    }

    /// Every id to query assignments under, de-duplicated
    pub fn ids(&self) -> &[ClientId] {
        &self.ids
    }

    /// The alias matching `candidate`, used as the acting id for
    /// ownership checks.
    pub fn matching(&self, candidate: &ClientId) -> Option<&ClientId> {
        self.ids.iter().find(|id| *id == candidate)
    }
}

/// Resolves an external client reference (document id or auth id) to the
/// client and its full alias set.
pub struct IdentityResolver {
    client_repo: Arc<dyn ClientRepository>,
}

impl IdentityResolver {
    pub fn new(client_repo: Arc<dyn ClientRepository>) -> Self {
        Self { client_repo }
    }

    pub async fn resolve(&self, client_ref: &str) -> Result<ClientAliases, DomainError> {
        if let Some(client) = self
            .client_repo
            .find_by_id(&ClientId::from_string(client_ref))
            .await?
        {
            return Ok(ClientAliases::new(client));
        }

        if let Some(client) = self.client_repo.find_by_auth_id(client_ref).await? {
            return Ok(ClientAliases::new(client));
        }

        Err(DomainError::ClientNotFound(format!(
            "No client found for reference: {}",
            client_ref
        )))
    }
}
