// Storage error taxonomy

use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Well-formed id with no matching row
    #[error("{0} not found: {1}")]
    NotFound(&'static str, i64),

    /// Unique-constraint conflict that find-or-create could not re-resolve
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound(entity, id)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_, _))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        // 23505 = unique_violation; surfaces when an explicit-id overwrite
        // collides with another row's (name, type) identity
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::Conflict(db_err.message().to_string());
            }
        }
        StoreError::Database(e.to_string())
    }
}
