use axum::Router;
use http::{HeaderValue, Method, StatusCode, header};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::core::services::SalonService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use rate_limit::{RateLimiter, rate_limit_middleware};

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod rate_limit;

pub type AppState = Arc<SalonService<InMemoryStorage>>;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Full HTTP application: `/api`, the OpenAPI document, Swagger UI and the 404 fallback.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so the rate limiter
/// can key on the peer address when no `X-Forwarded-For` header is present.
pub fn app(state: AppState, config: &Config) -> Router {
    let limiter = Arc::new(RateLimiter::from_config(config));
    Router::new()
        .nest("/api", handlers::api_routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}
