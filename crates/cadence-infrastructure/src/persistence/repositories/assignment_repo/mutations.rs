use serde_json;
use std::time::Instant;
use tracing::info;

use crate::persistence::RepositoryErrorMapper;
use cadence_domain::assignment::CheckInAssignment;
use cadence_domain::shared::{AssignmentId, DomainError};

const UPSERT_QUERY: &str = r#"
    INSERT INTO assignments (
        id, client_id, coach_id, form_id, form_title,
        due_date, due_time, check_in_window,
        recurring_week, total_weeks, is_recurring, reflection_week_start,
        status, response_id, completed_at,
        extension_granted, extension_requested_at, extension_reason,
        reopen_requested_at,
        missed_at, missed_reason, missed_comment,
        paused_until, pause_history, created_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)
    ON CONFLICT(id) DO UPDATE SET
        client_id = ?2,
        coach_id = ?3,
        form_id = ?4,
        form_title = ?5,
        due_date = ?6,
        due_time = ?7,
        check_in_window = ?8,
        recurring_week = ?9,
        total_weeks = ?10,
        is_recurring = ?11,
        reflection_week_start = ?12,
        status = ?13,
        response_id = ?14,
        completed_at = ?15,
        extension_granted = ?16,
        extension_requested_at = ?17,
        extension_reason = ?18,
        reopen_requested_at = ?19,
        missed_at = ?20,
        missed_reason = ?21,
        missed_comment = ?22,
        paused_until = ?23,
        pause_history = ?24
"#;

/// Upsert one assignment on any executor, so single saves and the
/// batch transaction share the same statement.
async fn upsert_one<'e, E>(executor: E, assignment: &CheckInAssignment) -> Result<(), DomainError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let window_json = assignment
        .window()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Serialize check-in window"))?;
    let pause_history_json = serde_json::to_string(assignment.pause_history())
        .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Serialize pause history"))?;

    sqlx::query(UPSERT_QUERY)
        .bind(assignment.id().as_str())
        .bind(assignment.client_id().as_str())
        .bind(assignment.coach_id().as_str())
        .bind(assignment.form_id().as_str())
        .bind(assignment.form_title())
        .bind(assignment.due_date())
        .bind(assignment.due_time())
        .bind(window_json)
        .bind(assignment.recurring_week() as i64)
        .bind(assignment.total_weeks() as i64)
        .bind(assignment.is_recurring())
        .bind(assignment.reflection_week_start())
        .bind(assignment.status().as_str())
        .bind(assignment.response_id().map(|r| r.as_str()))
        .bind(assignment.completed_at())
        .bind(assignment.extension_granted())
        .bind(assignment.extension_requested_at())
        .bind(assignment.extension_reason())
        .bind(assignment.reopen_requested_at())
        .bind(assignment.missed_at())
        .bind(assignment.missed_reason().map(|r| r.as_str()))
        .bind(assignment.missed_comment())
        .bind(assignment.paused_until())
        .bind(pause_history_json)
        .bind(assignment.created_at())
        .execute(executor)
        .await
        .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Save assignment"))?;

    Ok(())
}

impl super::SqliteAssignmentRepository {
    pub(super) async fn save_impl(&self, assignment: &CheckInAssignment) -> Result<(), DomainError> {
        let start = Instant::now();

        upsert_one(&*self.pool, assignment).await?;

        let elapsed = start.elapsed();
        info!(
            "📊 Assignment saved: {} in {:.2}ms",
            assignment.id().as_str(),
            elapsed.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    pub(super) async fn save_all_impl(
        &self,
        assignments: &[CheckInAssignment],
    ) -> Result<(), DomainError> {
        if assignments.is_empty() {
            return Ok(());
        }

        let start = Instant::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Begin transaction"))?;

        for assignment in assignments {
            upsert_one(&mut *tx, assignment).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Commit transaction"))?;

        let elapsed = start.elapsed();
        info!(
            "📊 Batch save: {} assignments in {:.2}ms",
            assignments.len(),
            elapsed.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    pub(super) async fn delete_impl(&self, id: &AssignmentId) -> Result<(), DomainError> {
        let start = Instant::now();
        let query = "DELETE FROM assignments WHERE id = ?1";

        sqlx::query(query)
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Delete assignment"))?;

        let elapsed = start.elapsed();
        info!(
            "📊 delete({}): {:.2}ms",
            id.as_str(),
            elapsed.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    pub(super) async fn delete_all_impl(&self, ids: &[AssignmentId]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }

        let start = Instant::now();
        let id_strings: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();

        let placeholders = (1..=id_strings.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(",");

        let query = format!("DELETE FROM assignments WHERE id IN ({})", placeholders);

        let mut query_builder = sqlx::query(&query);
        for id_str in &id_strings {
            query_builder = query_builder.bind(id_str);
        }

        let result = query_builder
            .execute(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Delete assignments"))?;

        let elapsed = start.elapsed();
        info!(
            "📊 delete_all({} ids): {:.2}ms, {} rows deleted",
            ids.len(),
            elapsed.as_secs_f64() * 1000.0,
            result.rows_affected()
        );

        Ok(())
    }
}
