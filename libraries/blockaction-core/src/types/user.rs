/// User domain type
use super::UserId;
use crate::error::{IdentityError, Result};
use serde::{Deserialize, Serialize};

/// Account status flag
///
/// Stored as a small integer. Present in the schema but not consulted by
/// any use case yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    #[default]
    Active,
    Disabled,
}

impl UserState {
    /// Integer representation used in storage
    pub fn as_i16(self) -> i16 {
        match self {
            UserState::Active => 0,
            UserState::Disabled => 1,
        }
    }

    /// Parse the stored integer representation
    pub fn from_i16(value: i16) -> Result<Self> {
        match value {
            0 => Ok(UserState::Active),
            1 => Ok(UserState::Disabled),
            other => Err(IdentityError::storage(format!(
                "Invalid user state: {}",
                other
            ))),
        }
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Unique login handle
    pub account: String,

    /// Keyed one-way digest of the password (hex), never the plaintext
    #[serde(skip_serializing, default)]
    pub secret: String,

    /// Display name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Account status
    #[serde(default)]
    pub state: UserState,

    /// Creation time (ms since epoch)
    pub created_at: i64,

    /// Id of the actor that created the record
    pub creator: UserId,

    /// Last update time (ms since epoch)
    pub updated_at: i64,

    /// Id of the actor that last updated the record
    pub updater: UserId,
}

impl User {
    /// Build the entity persisted by signup.
    ///
    /// A self-registered user is its own creator and updater.
    pub fn new_signup(
        id: UserId,
        account: impl Into<String>,
        name: impl Into<String>,
        secret: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            account: account.into(),
            secret: secret.into(),
            name: name.into(),
            description: String::new(),
            state: UserState::Active,
            created_at: now_ms,
            creator: id,
            updated_at: now_ms,
            updater: id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_user_is_its_own_creator() {
        let id = UserId::new(99);
        let user = User::new_signup(id, "testuser", "Tester", "abcdef", 1_000);

        assert_eq!(user.creator, id);
        assert_eq!(user.updater, id);
        assert_eq!(user.created_at, 1_000);
        assert_eq!(user.updated_at, 1_000);
        assert_eq!(user.state, UserState::Active);
        assert!(user.description.is_empty());
    }

    #[test]
    fn secret_is_never_serialized() {
        let user = User::new_signup(UserId::new(1), "testuser", "Tester", "deadbeef", 0);
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("secret").is_none());
        assert_eq!(json["account"], "testuser");
    }

    #[test]
    fn state_round_trips_through_storage_integer() {
        for state in [UserState::Active, UserState::Disabled] {
            assert_eq!(UserState::from_i16(state.as_i16()).unwrap(), state);
        }
        assert!(UserState::from_i16(7).is_err());
    }
}
