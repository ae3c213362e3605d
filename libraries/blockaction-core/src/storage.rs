//! Identity store contract

use crate::error::Result;
use crate::types::{User, UserId};
use async_trait::async_trait;

/// Narrow data-access contract for user records
///
/// Lookups report a missing user as `Ok(None)`; only genuine storage
/// failures are errors.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Insert a new user
    ///
    /// Fails with [`IdentityError::Conflict`](crate::IdentityError::Conflict)
    /// if the account is already taken.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Whether a user with this account exists
    async fn exists_by_account(&self, account: &str) -> Result<bool>;

    /// Get user by ID
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Get user by account
    async fn get_by_account(&self, account: &str) -> Result<Option<User>>;
}
