use cadence_domain::shared::DomainError;

/// Translates low-level storage errors into domain errors with context
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(e: sqlx::Error, context: &str) -> DomainError {
        match &e {
            sqlx::Error::RowNotFound => {
                DomainError::NotFound(format!("{}: row not found", context))
            }
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => DomainError::Conflict(format!(
                    "{}: a row with the same key already exists",
                    context
                )),
                sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    DomainError::Repository(format!("{}: constraint violation: {}", context, db))
                }
                _ => DomainError::Repository(format!("{}: {}", context, e)),
            },
            _ => DomainError::Repository(format!("{}: {}", context, e)),
        }
    }

    pub fn map_json_error(e: serde_json::Error, context: &str) -> DomainError {
        DomainError::Serialization(format!("{}: {}", context, e))
    }
}
