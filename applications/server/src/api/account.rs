/// Account API routes
use crate::{
    api::{extract::ValidatedJson, ApiResponse},
    error::Result,
    services::{SigninInput, SignupInput, TokenPair},
    state::AppState,
    validation::{check_present, Validate},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub account: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl Validate for RefreshRequest {
    fn validate(&self) -> Result<()> {
        check_present("refresh_token", &self.refresh_token)
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /v1/signup
pub async fn signup(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupInput>,
) -> Result<Json<ApiResponse<SignupResponse>>> {
    let account = app_state.accounts.signup(&req).await?;
    Ok(Json(ApiResponse::new(SignupResponse { account })))
}

/// POST /v1/signin
pub async fn signin(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SigninInput>,
) -> Result<Json<ApiResponse<TokenPair>>> {
    let tokens = app_state.accounts.signin(&req).await?;
    Ok(Json(ApiResponse::new(tokens)))
}

/// POST /v1/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>> {
    let token = app_state.accounts.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::new(RefreshResponse { token })))
}
