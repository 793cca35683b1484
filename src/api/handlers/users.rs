use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::{
    AppState,
    middleware::CurrentUser,
    models::{
        ApiError, ApiJson, ApiQuery, ApiResponse, ErrorResponse, MessageResponse, UserListPayload, UserListQuery,
        UserPayload, parse_id,
    },
};
use crate::core::{
    models::{input::UserUpdate, page::PageRequest, stats::UserStats},
    services::DEFAULT_USER_PAGE_SIZE,
};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Users, newest first", body = ApiResponse<UserListPayload>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_users(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<Json<ApiResponse<UserListPayload>>, ApiError> {
    let filter = query.filter()?;
    let page = PageRequest::new(query.page, query.limit, DEFAULT_USER_PAGE_SIZE);
    let page = service.list_users(&actor, &filter, page).await?;
    Ok(Json(ApiResponse::ok(UserListPayload {
        users: page.items,
        pagination: page.pagination,
    })))
}

#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "users",
    responses(
        (status = 200, description = "Account counts", body = ApiResponse<UserStats>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn user_stats(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserStats>>, ApiError> {
    Ok(Json(ApiResponse::ok(service.user_stats(&actor).await?)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = ApiResponse<UserPayload>),
        (status = 400, description = "Invalid ID format", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_user(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserPayload>>, ApiError> {
    let user = service.get_user(&actor, parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(UserPayload { user })))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserPayload>),
        (status = 400, description = "Validation error or email taken", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_user(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UserUpdate>,
) -> Result<Json<ApiResponse<UserPayload>>, ApiError> {
    let user = service.update_user(&actor, parse_id(&id)?, req).await?;
    Ok(Json(ApiResponse::with_message(UserPayload { user }, "User updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Own account or invalid id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_user(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_user(&actor, parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
