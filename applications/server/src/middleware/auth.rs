/// Authorization gate for protected routes
use crate::{error::ServerError, services::TokenService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use blockaction_core::UserId;
use std::sync::Arc;

/// Message returned for every rejected bearer token
pub const INVALID_AUTHORIZATION: &str = "Invalid Authorization";

const BEARER_PREFIX: &str = "Bearer ";

/// Verified identity attached to the request by [`auth_middleware`]
/// Can be used as an extractor in handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub account: String,
}

/// Pull the token out of `Authorization: Bearer <token>`
///
/// The prefix must appear exactly once and the token must be non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?;
    if token.is_empty() || token.contains(BEARER_PREFIX) {
        return None;
    }
    Some(token)
}

/// Middleware that validates the bearer token before the handler runs
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::warn!("Missing or malformed Authorization header");
        return Err(ServerError::Auth(INVALID_AUTHORIZATION.to_string()));
    };

    let claims = tokens.validate(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Auth(INVALID_AUTHORIZATION.to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: claims.id,
        account: claims.account,
    });

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth(INVALID_AUTHORIZATION.to_string()))
    }
}
