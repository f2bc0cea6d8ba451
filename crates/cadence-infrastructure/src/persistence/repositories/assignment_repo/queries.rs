use std::time::Instant;
use tracing::info;

use super::types::AssignmentRow;
use crate::persistence::RepositoryErrorMapper;
use cadence_domain::assignment::CheckInAssignment;
use cadence_domain::shared::{AssignmentId, ClientId, DomainError, FormId};

impl super::SqliteAssignmentRepository {
    pub(super) async fn find_by_id_impl(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<CheckInAssignment>, DomainError> {
        let start = Instant::now();

        let query = format!(
            r#"
            {}
            WHERE id = ?1
        "#,
            Self::SELECT_QUERY
        );

        let row: Option<AssignmentRow> = sqlx::query_as(&query)
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find assignment by ID"))?;

        let elapsed = start.elapsed();
        let found = row.is_some();
        info!(
            "📊 find_by_id({}): {:.2}ms, found: {}",
            id.as_str(),
            elapsed.as_secs_f64() * 1000.0,
            found
        );

        match row {
            Some(row) => Ok(Some(row.to_assignment()?)),
            None => Ok(None),
        }
    }

    pub(super) async fn find_by_client_impl(
        &self,
        client_ids: &[ClientId],
    ) -> Result<Vec<CheckInAssignment>, DomainError> {
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let id_strings: Vec<String> = client_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        // Build parameterized query with placeholders
        let placeholders = (1..=id_strings.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(",");

        let query = format!(
            r#"
            {}
            WHERE client_id IN ({})
            ORDER BY due_date ASC
        "#,
            Self::SELECT_QUERY,
            placeholders
        );

        let mut query_builder = sqlx::query_as::<_, AssignmentRow>(&query);
        for id_str in &id_strings {
            query_builder = query_builder.bind(id_str);
        }

        let rows: Vec<AssignmentRow> = query_builder
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find assignments by client"))?;

        let elapsed = start.elapsed();
        let count = rows.len();

        if elapsed.as_millis() > 100 {
            tracing::warn!(
                "🐌 SLOW QUERY: find_by_client({} ids) took {:.2}ms for {} assignments",
                client_ids.len(),
                elapsed.as_secs_f64() * 1000.0,
                count
            );
        }

        info!(
            "📊 find_by_client({} ids): {:.2}ms, {} assignments",
            client_ids.len(),
            elapsed.as_secs_f64() * 1000.0,
            count
        );

        rows.into_iter().map(|row| row.to_assignment()).collect()
    }

    pub(super) async fn find_by_series_impl(
        &self,
        client_ids: &[ClientId],
        form_id: &FormId,
    ) -> Result<Vec<CheckInAssignment>, DomainError> {
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let id_strings: Vec<String> = client_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        let placeholders = (1..=id_strings.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(",");

        let query = format!(
            r#"
            {}
            WHERE client_id IN ({}) AND form_id = ?{}
            ORDER BY recurring_week ASC, due_date ASC
        "#,
            Self::SELECT_QUERY,
            placeholders,
            id_strings.len() + 1
        );

        let mut query_builder = sqlx::query_as::<_, AssignmentRow>(&query);
        for id_str in &id_strings {
            query_builder = query_builder.bind(id_str);
        }
        query_builder = query_builder.bind(form_id.as_str());

        let rows: Vec<AssignmentRow> = query_builder
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, "Find assignments by series"))?;

        let elapsed = start.elapsed();
        info!(
            "📊 find_by_series({}, {} client ids): {:.2}ms, {} assignments",
            form_id.as_str(),
            client_ids.len(),
            elapsed.as_secs_f64() * 1000.0,
            rows.len()
        );

        // Series mutations (pause, delete) need every occurrence; a row that
        // fails to load must fail the whole read.
        rows.into_iter().map(|row| row.to_assignment()).collect()
    }
}
