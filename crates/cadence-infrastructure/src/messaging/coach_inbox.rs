use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::info;

use crate::persistence::ResultExt;
use cadence_domain::messaging::{CoachMessage, MessageSender};
use cadence_domain::shared::{AssignmentId, ClientId, CoachId, DomainError, MessageId};

#[derive(FromRow)]
struct MessageRow {
    id: String,
    coach_id: String,
    client_id: String,
    assignment_id: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> CoachMessage {
        CoachMessage::restore(
            MessageId::from_string(&self.id),
            CoachId::from_string(&self.coach_id),
            ClientId::from_string(&self.client_id),
            AssignmentId::from_string(&self.assignment_id),
            self.body,
            self.created_at,
        )
    }
}

/// In-app coach inbox backed by the shared SQLite database
pub struct SqliteCoachInbox {
    pool: Arc<SqlitePool>,
}

impl SqliteCoachInbox {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn find_by_coach(&self, coach_id: &CoachId) -> Result<Vec<CoachMessage>, DomainError> {
        let query = r#"
            SELECT id, coach_id, client_id, assignment_id, body, created_at
            FROM coach_messages
            WHERE coach_id = ?1
            ORDER BY created_at DESC
        "#;

        let rows: Vec<MessageRow> = sqlx::query_as(query)
            .bind(coach_id.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_repo_error("Find messages by coach")?;

        Ok(rows.into_iter().map(|r| r.into_message()).collect())
    }
}

#[async_trait]
impl MessageSender for SqliteCoachInbox {
    async fn send(&self, message: &CoachMessage) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO coach_messages (id, coach_id, client_id, assignment_id, body, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#;

        sqlx::query(query)
            .bind(message.id().as_str())
            .bind(message.coach_id().as_str())
            .bind(message.client_id().as_str())
            .bind(message.assignment_id().as_str())
            .bind(message.body())
            .bind(message.created_at())
            .execute(&*self.pool)
            .await
            .map_repo_error("Send coach message")?;

        info!(
            "📊 Coach message delivered: {} -> coach {}",
            message.id().as_str(),
            message.coach_id().as_str()
        );

        Ok(())
    }
}
