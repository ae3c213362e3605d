/// Health check API route
use axum::http::StatusCode;

/// GET /health - liveness only, empty body
pub async fn health() -> StatusCode {
    StatusCode::OK
}
