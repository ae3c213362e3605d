/// Request ids for tracing, drawn from the snowflake generator
use axum::{
    body::Body,
    http::{HeaderValue, Request},
};
use blockaction_core::SnowflakeGenerator;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Assigns an `X-Request-ID` to requests that arrive without one
#[derive(Debug, Clone)]
pub struct SnowflakeRequestId(Arc<SnowflakeGenerator>);

impl SnowflakeRequestId {
    pub fn new(ids: Arc<SnowflakeGenerator>) -> Self {
        Self(ids)
    }
}

impl MakeRequestId for SnowflakeRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&self.0.next_id().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span for `TraceLayer`, tagged with the request id
pub fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    tracing::info_span!(
        "http-request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id
    )
}
