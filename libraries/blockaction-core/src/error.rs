/// Core error types for BlockAction
use thiserror::Error;

/// Result type alias using `IdentityError`
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Core error type for BlockAction
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A uniqueness constraint was violated (e.g. duplicate account)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IdentityError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
