use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::{
    AppState,
    middleware::CurrentUser,
    models::{ApiError, ApiJson, ApiResponse, ErrorResponse, UserPayload},
};
use crate::core::{
    models::{
        input::{LoginInput, RegisterInput},
        user::UserProfile,
    },
    services::AuthSession,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterInput,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<AuthSession>),
        (status = 400, description = "Validation error or email taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<AppState>,
    ApiJson(req): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>), ApiError> {
    let session = service.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(session, "User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthSession>),
        (status = 401, description = "Invalid credentials or deactivated account", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<AppState>,
    ApiJson(req): ApiJson<LoginInput>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    let session = service.login(req).await?;
    Ok(Json(ApiResponse::with_message(session, "Login successful")))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserPayload>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<ApiResponse<UserPayload>> {
    Json(ApiResponse::ok(UserPayload {
        user: UserProfile::from(&user),
    }))
}
