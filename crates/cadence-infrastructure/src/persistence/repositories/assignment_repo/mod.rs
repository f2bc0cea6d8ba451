mod mutations;
mod queries;
mod types;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use cadence_domain::assignment::{AssignmentRepository, CheckInAssignment};
use cadence_domain::shared::{AssignmentId, ClientId, DomainError, FormId};

pub struct SqliteAssignmentRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAssignmentRepository {
    const SELECT_QUERY: &'static str = r#"
            SELECT
                id, client_id, coach_id, form_id, form_title,
                due_date, due_time, check_in_window,
                recurring_week, total_weeks, is_recurring, reflection_week_start,
                status, response_id, completed_at,
                extension_granted, extension_requested_at, extension_reason,
                reopen_requested_at,
                missed_at, missed_reason, missed_comment,
                paused_until, pause_history, created_at
            FROM assignments
        "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for SqliteAssignmentRepository {
    async fn save(&self, assignment: &CheckInAssignment) -> Result<(), DomainError> {
        self.save_impl(assignment).await
    }

    async fn save_all(&self, assignments: &[CheckInAssignment]) -> Result<(), DomainError> {
        self.save_all_impl(assignments).await
    }

    async fn find_by_id(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<CheckInAssignment>, DomainError> {
        self.find_by_id_impl(id).await
    }

    async fn find_by_client(
        &self,
        client_ids: &[ClientId],
    ) -> Result<Vec<CheckInAssignment>, DomainError> {
        self.find_by_client_impl(client_ids).await
    }

    async fn find_by_series(
        &self,
        client_ids: &[ClientId],
        form_id: &FormId,
    ) -> Result<Vec<CheckInAssignment>, DomainError> {
        self.find_by_series_impl(client_ids, form_id).await
    }

    async fn delete(&self, id: &AssignmentId) -> Result<(), DomainError> {
        self.delete_impl(id).await
    }

    async fn delete_all(&self, ids: &[AssignmentId]) -> Result<(), DomainError> {
        self.delete_all_impl(ids).await
    }
}
