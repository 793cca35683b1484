use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{
    AppState,
    middleware::CurrentUser,
    models::{
        ApiError, ApiJson, ApiQuery, ApiResponse, ErrorResponse, MessageResponse, ServiceListPayload,
        ServiceListQuery, ServicePayload, parse_id,
    },
};
use crate::core::{
    models::{
        input::{ServiceInput, ServiceUpdate},
        page::PageRequest,
        stats::ServiceStats,
    },
    services::DEFAULT_SERVICE_PAGE_SIZE,
};

#[utoipa::path(
    get,
    path = "/api/services",
    tag = "services",
    params(ServiceListQuery),
    responses(
        (status = 200, description = "Services, newest first", body = ApiResponse<ServiceListPayload>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_services(
    State(service): State<AppState>,
    ApiQuery(query): ApiQuery<ServiceListQuery>,
) -> Result<Json<ApiResponse<ServiceListPayload>>, ApiError> {
    let filter = query.filter()?;
    let page = PageRequest::new(query.page, query.limit, DEFAULT_SERVICE_PAGE_SIZE);
    let page = service.list_services(&filter, page).await?;
    Ok(Json(ApiResponse::ok(ServiceListPayload {
        services: page.items,
        pagination: page.pagination,
    })))
}

#[utoipa::path(
    get,
    path = "/api/services/stats",
    tag = "services",
    responses(
        (status = 200, description = "Catalog statistics", body = ApiResponse<ServiceStats>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn service_stats(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ServiceStats>>, ApiError> {
    Ok(Json(ApiResponse::ok(service.service_stats(&actor).await?)))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = ApiResponse<ServicePayload>),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_service(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ServicePayload>>, ApiError> {
    let found = service.get_service(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(ServicePayload { service: found })))
}

#[utoipa::path(
    post,
    path = "/api/services",
    tag = "services",
    request_body = ServiceInput,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<ServicePayload>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_service(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    ApiJson(req): ApiJson<ServiceInput>,
) -> Result<(StatusCode, Json<ApiResponse<ServicePayload>>), ApiError> {
    let created = service.create_service(&actor, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            ServicePayload { service: created },
            "Service created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = ServiceUpdate,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServicePayload>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_service(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ServiceUpdate>,
) -> Result<Json<ApiResponse<ServicePayload>>, ApiError> {
    let updated = service.update_service(&actor, parse_id(&id)?, req).await?;
    Ok(Json(ApiResponse::with_message(
        ServicePayload { service: updated },
        "Service updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service deleted", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_service(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_service(&actor, parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}
