/// HTTP router assembly
use crate::{
    api,
    config::CorsSettings,
    error::{Result, ServerError},
    middleware::{self, request_id, SnowflakeRequestId},
    state::AppState,
};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Build the application router
pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/v1/signup", post(api::account::signup))
        .route("/v1/signin", post(api::account::signin))
        .route("/v1/refresh", post(api::account::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/v1/user/personal-info", get(api::user::personal_info))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.tokens),
            middleware::auth_middleware,
        ));

    let x_request_id = HeaderName::from_static(request_id::X_REQUEST_ID);

    Router::new()
        .route("/health", get(api::health::health))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    SnowflakeRequestId::new(Arc::clone(&app_state.ids)),
                ))
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_id::make_span))
                .layer(cors),
        )
        .with_state(app_state)
}

/// Build the CORS layer from configuration
///
/// Browsers refuse credentials on a wildcard origin, so credentials are only
/// advertised for an explicit origin list.
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(request_id::X_REQUEST_ID),
            HeaderName::from_static("x-api-key"),
        ])
        .expose_headers([HeaderName::from_static(request_id::X_REQUEST_ID)])
        .max_age(Duration::from_secs(settings.max_age_secs));

    if settings.allows_any_origin() {
        return Ok(layer.allow_origin(AllowOrigin::any()));
    }

    let origins = settings
        .allow_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::Config(format!("invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(settings.allow_credentials))
}
