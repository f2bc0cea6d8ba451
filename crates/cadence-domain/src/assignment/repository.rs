use async_trait::async_trait;

use super::aggregate::CheckInAssignment;
use crate::shared::{AssignmentId, ClientId, DomainError, FormId};

/// Assignment repository trait.
///
/// Client-scoped queries take a slice of ids because the same logical
/// client may be referenced by its document id or its auth-provider id;
/// callers resolve the alias set once and pass all of it.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Save (insert or update) a single assignment
    async fn save(&self, assignment: &CheckInAssignment) -> Result<(), DomainError>;

    /// Save a batch atomically. Used by pause/unpause so partial
    /// application is never observable.
    async fn save_all(&self, assignments: &[CheckInAssignment]) -> Result<(), DomainError>;

    /// Find an assignment by id
    async fn find_by_id(&self, id: &AssignmentId)
        -> Result<Option<CheckInAssignment>, DomainError>;

    /// All assignments for any of the given client ids, de-duplicated
    async fn find_by_client(
        &self,
        client_ids: &[ClientId],
    ) -> Result<Vec<CheckInAssignment>, DomainError>;

    /// One series: all assignments for any of the client ids and the form
    async fn find_by_series(
        &self,
        client_ids: &[ClientId],
        form_id: &FormId,
    ) -> Result<Vec<CheckInAssignment>, DomainError>;

    /// Delete a single assignment
    async fn delete(&self, id: &AssignmentId) -> Result<(), DomainError>;

    /// Delete a batch atomically (series deletion)
    async fn delete_all(&self, ids: &[AssignmentId]) -> Result<(), DomainError>;
}
