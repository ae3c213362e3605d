//! User account queries

use crate::error::{Result, StorageError};
use blockaction_core::types::{User, UserId, UserState};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Insert a new user
///
/// # Errors
///
/// Returns [`StorageError::Conflict`] if the account is already taken
pub async fn create(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        "INSERT INTO users (id, account, secret, name, description, state, created_at, creator, updated_at, updater)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user.id)
    .bind(&user.account)
    .bind(&user.secret)
    .bind(&user.name)
    .bind(&user.description)
    .bind(user.state.as_i16())
    .bind(user.created_at)
    .bind(user.creator)
    .bind(user.updated_at)
    .bind(user.updater)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_insert(e, "account"))?;

    Ok(())
}

/// Check if an account is taken
pub async fn exists_by_account(pool: &SqlitePool, account: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE account = ?")
        .bind(account)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, account, secret, name, description, state, created_at, creator, updated_at, updater
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get user by account
pub async fn get_by_account(pool: &SqlitePool, account: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, account, secret, name, description, state, created_at, creator, updated_at, updater
         FROM users WHERE account = ?",
    )
    .bind(account)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

fn from_row(row: &SqliteRow) -> Result<User> {
    let state = UserState::from_i16(row.try_get("state")?)
        .map_err(|e| StorageError::InvalidData(e.to_string()))?;

    Ok(User {
        id: row.try_get("id")?,
        account: row.try_get("account")?,
        secret: row.try_get("secret")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        state,
        created_at: row.try_get("created_at")?,
        creator: row.try_get("creator")?,
        updated_at: row.try_get("updated_at")?,
        updater: row.try_get("updater")?,
    })
}
