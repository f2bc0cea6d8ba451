use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(AssignmentId);
define_id!(ClientId);
define_id!(CoachId);
define_id!(FormId);
define_id!(ResponseId);
define_id!(MessageId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authorization (1xxx)
    PermissionDenied = 1001,

    // Resource Not Found (2xxx)
    AssignmentNotFound = 2001,
    ClientNotFound = 2002,
    FormNotFound = 2003,

    // Business Logic (3xxx)
    InvalidState = 3001,
    AlreadyCompleted = 3002,
    DuplicateOccurrence = 3003,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DatabaseConstraintViolation = 4002,
    DataIntegrityError = 4003,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
    MissingRequiredField = 6003,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::PermissionDenied
            | ErrorCode::InvalidState
            | ErrorCode::AlreadyCompleted
            | ErrorCode::DuplicateOccurrence => ErrorSeverity::Warning,

            ErrorCode::AssignmentNotFound
            | ErrorCode::ClientNotFound
            | ErrorCode::FormNotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput
            | ErrorCode::MissingRequiredField => ErrorSeverity::Info,

            ErrorCode::RepositoryError
            | ErrorCode::DatabaseConstraintViolation
            | ErrorCode::DataIntegrityError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Check if error is recoverable by the caller
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ErrorCode::DataIntegrityError | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Assignment not found: {0}")]
    AssignmentNotFound(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            DomainError::AssignmentNotFound(_) => ErrorCode::AssignmentNotFound,
            DomainError::ClientNotFound(_) => ErrorCode::ClientNotFound,
            DomainError::NotFound(_) => ErrorCode::AssignmentNotFound,
            DomainError::InvalidState(_) => ErrorCode::InvalidState,
            DomainError::AlreadyCompleted(_) => ErrorCode::AlreadyCompleted,
            DomainError::Conflict(_) => ErrorCode::DuplicateOccurrence,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::PermissionDenied(msg)
            | DomainError::AssignmentNotFound(msg)
            | DomainError::ClientNotFound(msg)
            | DomainError::NotFound(msg)
            | DomainError::InvalidState(msg)
            | DomainError::AlreadyCompleted(msg)
            | DomainError::Conflict(msg)
            | DomainError::Repository(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
