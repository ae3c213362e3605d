/// Account use cases - signup, signin, token refresh, personal info
use crate::{
    error::{Result, ServerError},
    services::{
        secret::SecretCodec,
        token::{TokenPair, TokenService},
    },
    validation::{check_length, check_present, Validate},
};
use blockaction_core::{IdentityStore, SnowflakeGenerator, User, UserId};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    pub account: String,
    pub password: String,
    pub user_name: String,
}

impl Validate for SignupInput {
    fn validate(&self) -> Result<()> {
        check_length("account", &self.account, 6, 12)?;
        check_length("password", &self.password, 8, 16)?;
        check_length("user_name", &self.user_name, 2, 20)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigninInput {
    pub account: String,
    pub password: String,
}

impl Validate for SigninInput {
    fn validate(&self) -> Result<()> {
        check_present("account", &self.account)?;
        check_present("password", &self.password)
    }
}

pub struct AccountService {
    store: Arc<dyn IdentityStore>,
    secrets: SecretCodec,
    tokens: Arc<TokenService>,
    ids: Arc<SnowflakeGenerator>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        secrets: SecretCodec,
        tokens: Arc<TokenService>,
        ids: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            store,
            secrets,
            tokens,
            ids,
        }
    }

    /// Register a new account, returning the account name
    pub async fn signup(&self, input: &SignupInput) -> Result<String> {
        input.validate()?;

        if self.store.exists_by_account(&input.account).await? {
            tracing::info!("Signup rejected, account {} exists", input.account);
            return Err(ServerError::Conflict("account already exist".to_string()));
        }

        let id = self.ids.next_id();
        let secret = self.secrets.derive_secret(&input.password)?;
        let user = User::new_signup(
            id,
            input.account.as_str(),
            input.user_name.as_str(),
            secret,
            Utc::now().timestamp_millis(),
        );

        self.store.create_user(&user).await?;
        tracing::info!("Created user {} ({})", user.account, id);

        Ok(user.account)
    }

    /// Check credentials and issue an access/refresh token pair
    ///
    /// Unknown account and wrong password fail with the same message.
    pub async fn signin(&self, input: &SigninInput) -> Result<TokenPair> {
        input.validate()?;

        let Some(user) = self.store.get_by_account(&input.account).await? else {
            tracing::debug!("Signin failed, unknown account");
            return Err(ServerError::bad_credentials());
        };

        if !self.secrets.verify_secret(&input.password, &user.secret)? {
            tracing::debug!("Signin failed, wrong password for user {}", user.id);
            return Err(ServerError::bad_credentials());
        }

        self.tokens.create_token_pair(&user)
    }

    /// Exchange a refresh token for a fresh access token
    ///
    /// A bad token, an access token and an unknown user all fail with the
    /// same message.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let claims = self
            .tokens
            .validate(refresh_token)
            .map_err(|_| ServerError::bad_credentials())?;
        if !claims.is_refresh() {
            tracing::debug!("Refresh rejected, token has an expiry");
            return Err(ServerError::bad_credentials());
        }

        let Some(user) = self.store.get_by_id(claims.id).await? else {
            tracing::debug!("Refresh rejected, unknown user {}", claims.id);
            return Err(ServerError::bad_credentials());
        };

        self.tokens.create_access_token(&user)
    }

    /// Load the authenticated user's record
    pub async fn personal_info(&self, user_id: UserId) -> Result<User> {
        self.store
            .get_by_id(user_id)
            .await?
            .ok_or_else(ServerError::bad_credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(account: &str, password: &str, user_name: &str) -> SignupInput {
        SignupInput {
            account: account.to_string(),
            password: password.to_string(),
            user_name: user_name.to_string(),
        }
    }

    #[test]
    fn test_signup_account_length_bounds() {
        assert!(signup("abcde", "abcd1234", "tester").validate().is_err());
        assert!(signup("abcdef", "abcd1234", "tester").validate().is_ok());
        assert!(signup("abcdefghijkl", "abcd1234", "tester").validate().is_ok());
        assert!(signup("abcdefghijklm", "abcd1234", "tester").validate().is_err());
    }

    #[test]
    fn test_signup_password_and_name_bounds() {
        assert!(signup("testuser", "abcd123", "tester").validate().is_err());
        assert!(signup("testuser", "abcd1234abcd1234", "tester").validate().is_ok());
        assert!(signup("testuser", "abcd1234abcd12345", "tester").validate().is_err());
        assert!(signup("testuser", "abcd1234", "t").validate().is_err());
        assert!(signup("testuser", "abcd1234", "ab").validate().is_ok());
        assert!(signup("testuser", "abcd1234", &"n".repeat(21)).validate().is_err());
    }

    #[test]
    fn test_lengths_count_characters() {
        // six characters, eighteen bytes
        assert!(signup("帳號帳號帳號", "abcd1234", "名稱").validate().is_ok());
    }

    #[test]
    fn test_signin_requires_fields() {
        let input = SigninInput {
            account: "testuser".to_string(),
            password: String::new(),
        };
        assert!(matches!(input.validate(), Err(ServerError::Validation(_))));
    }
}
