/// User API routes
use crate::{api::ApiResponse, error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PersonalInfoResponse {
    /// Decimal string, ids exceed the safe integer range of JSON clients
    pub id: String,
    pub account: String,
    pub user_name: String,
}

/// GET /v1/user/personal-info
pub async fn personal_info(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<PersonalInfoResponse>>> {
    let record = app_state.accounts.personal_info(user.id).await?;

    Ok(Json(ApiResponse::new(PersonalInfoResponse {
        id: record.id.to_string(),
        account: record.account,
        user_name: record.name,
    })))
}
