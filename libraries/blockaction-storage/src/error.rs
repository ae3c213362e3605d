/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Stored row could not be mapped back to a domain value
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Map an insert failure, turning unique violations into `Conflict`
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::Conflict(format!("{} already exists", what))
            }
            other => Self::Database(other),
        }
    }
}

impl From<StorageError> for blockaction_core::IdentityError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict(msg) => blockaction_core::IdentityError::conflict(msg),
            other => blockaction_core::IdentityError::storage(other.to_string()),
        }
    }
}
