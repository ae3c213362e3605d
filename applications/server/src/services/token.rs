/// Token issuance and validation - HS256 signed JWTs
use crate::error::{Result, ServerError};
use blockaction_core::{User, UserId};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity claims carried by access and refresh tokens
///
/// Access tokens carry the account and an expiry. Refresh tokens carry only
/// the user id and never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub id: UserId,
    #[serde(default)]
    pub account: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iss: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl UserClaims {
    /// Refresh tokens are the ones without an expiry
    pub fn is_refresh(&self) -> bool {
        self.exp.is_none()
    }
}

/// Access/refresh token pair returned by signin
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    access_token_ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(key: impl AsRef<[u8]>, issuer: impl Into<String>, access_ttl_secs: u32) -> Self {
        let key = key.as_ref();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // exp is checked when present; refresh tokens have none
        validation.set_required_spec_claims::<&str>(&[]);

        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            validation,
            issuer: issuer.into(),
            access_token_ttl: Duration::seconds(i64::from(access_ttl_secs)),
        }
    }

    /// Claims for an access token issued at `issued_at`
    pub fn access_claims(&self, user: &User, issued_at: DateTime<Utc>) -> UserClaims {
        UserClaims {
            id: user.id,
            account: user.account.clone(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: Some((issued_at + self.access_token_ttl).timestamp()),
        }
    }

    /// Claims for a refresh token issued at `issued_at`
    pub fn refresh_claims(&self, user_id: UserId, issued_at: DateTime<Utc>) -> UserClaims {
        UserClaims {
            id: user_id,
            account: String::new(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: None,
        }
    }

    /// Sign claims into a compact token
    pub fn issue(&self, claims: &UserClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ServerError::Crypto(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature and expiry, returning the embedded claims
    ///
    /// The issuer claim is not checked.
    pub fn validate(&self, token: &str) -> Result<UserClaims> {
        decode::<UserClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                ServerError::Auth("invalid token".to_string())
            })
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, user: &User) -> Result<String> {
        self.issue(&self.access_claims(user, Utc::now()))
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user_id: UserId) -> Result<String> {
        self.issue(&self.refresh_claims(user_id, Utc::now()))
    }

    /// Create the access/refresh pair handed out at signin
    pub fn create_token_pair(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            token: self.create_access_token(user)?,
            refresh_token: self.create_refresh_token(user.id)?,
        })
    }
}
