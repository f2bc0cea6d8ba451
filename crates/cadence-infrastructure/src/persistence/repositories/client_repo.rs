use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::ResultExt;
use cadence_domain::client::{Client, ClientRepository};
use cadence_domain::scoring::{ScoringThresholds, ThresholdProfile};
use cadence_domain::shared::{ClientId, CoachId, DomainError};

#[derive(FromRow)]
struct ClientRow {
    id: String,
    auth_id: Option<String>,
    coach_id: String,
    name: String,
    threshold_profile: String,
    red_max: Option<f64>,
    orange_max: Option<f64>,
    created_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Result<Client, DomainError> {
        let profile = ThresholdProfile::from_str_name(&self.threshold_profile)?;

        // Both bounds present or neither; a half-stored override is corrupt
        let threshold_override = match (self.red_max, self.orange_max) {
            (Some(red_max), Some(orange_max)) => Some(ScoringThresholds::new(red_max, orange_max)?),
            (None, None) => None,
            _ => {
                return Err(DomainError::Deserialization(format!(
                    "Client {} has a partial threshold override",
                    self.id
                )))
            }
        };

        Ok(Client::restore(
            ClientId::from_string(&self.id),
            self.auth_id,
            CoachId::from_string(&self.coach_id),
            self.name,
            profile,
            threshold_override,
            self.created_at,
        ))
    }
}

pub struct SqliteClientRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteClientRepository {
    const SELECT_QUERY: &'static str = r#"
            SELECT id, auth_id, coach_id, name, threshold_profile, red_max, orange_max, created_at
            FROM clients
        "#;

    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepository {
    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO clients (id, auth_id, coach_id, name, threshold_profile, red_max, orange_max, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                auth_id = ?2,
                coach_id = ?3,
                name = ?4,
                threshold_profile = ?5,
                red_max = ?6,
                orange_max = ?7
        "#;

        let thresholds = client.threshold_override();

        sqlx::query(query)
            .bind(client.id().as_str())
            .bind(client.auth_id())
            .bind(client.coach_id().as_str())
            .bind(client.name())
            .bind(client.threshold_profile().as_str())
            .bind(thresholds.map(|t| t.red_max()))
            .bind(thresholds.map(|t| t.orange_max()))
            .bind(client.created_at())
            .execute(&*self.pool)
            .await
            .map_repo_error("Save client")?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let query = format!("{} WHERE id = ?1", Self::SELECT_QUERY);

        let row: Option<ClientRow> = sqlx::query_as(&query)
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_repo_error("Find client by ID")?;

        row.map(|r| r.into_client()).transpose()
    }

    async fn find_by_auth_id(&self, auth_id: &str) -> Result<Option<Client>, DomainError> {
        let query = format!("{} WHERE auth_id = ?1", Self::SELECT_QUERY);

        let row: Option<ClientRow> = sqlx::query_as(&query)
            .bind(auth_id)
            .fetch_optional(&*self.pool)
            .await
            .map_repo_error("Find client by auth ID")?;

        row.map(|r| r.into_client()).transpose()
    }

    async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<Client>, DomainError> {
        let query = format!(
            "{} WHERE coach_id = ?1 ORDER BY created_at ASC",
            Self::SELECT_QUERY
        );

        let rows: Vec<ClientRow> = sqlx::query_as(&query)
            .bind(coach_id)
            .fetch_all(&*self.pool)
            .await
            .map_repo_error("Find clients by coach")?;

        rows.into_iter().map(|r| r.into_client()).collect()
    }
}
