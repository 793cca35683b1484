use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use chrono::Utc;

use crate::api::{
    AppState,
    middleware::auth_middleware,
    models::{ErrorResponse, HealthResponse},
};

pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod users;

/// Routes mounted under `/api`.
pub fn api_routes(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/users", get(users::list_users))
        .route("/users/stats", get(users::user_stats))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/services", get(catalog::list_services).post(catalog::create_service))
        .route("/services/stats", get(catalog::service_stats))
        .route(
            "/services/{id}",
            get(catalog::get_service)
                .put(catalog::update_service)
                .delete(catalog::delete_service),
        )
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/appointments/stats", get(appointments::appointment_stats))
        .route("/appointments/user/{user_id}", get(appointments::user_appointments))
        .route(
            "/appointments/{id}",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health))
        .merge(protected_routes)
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "SalonBase API is running".to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            message: "Route not found".to_string(),
            error: None,
        }),
    )
}
