use crate::users;
use async_trait::async_trait;
use blockaction_core::{error::Result, storage::IdentityStore, types::*};
use sqlx::SqlitePool;

/// Identity store backed by `SQLite`
#[derive(Debug, Clone)]
pub struct SqliteIdentityStore {
    pool: SqlitePool,
}

impl SqliteIdentityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn exists_by_account(&self, account: &str) -> Result<bool> {
        Ok(users::exists_by_account(&self.pool, account).await?)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn get_by_account(&self, account: &str) -> Result<Option<User>> {
        Ok(users::get_by_account(&self.pool, account).await?)
    }
}
