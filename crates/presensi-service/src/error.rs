use std::time::Duration;

use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] presensi_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] presensi_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Tenant mismatch: {0}")]
    TenantMismatch(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
