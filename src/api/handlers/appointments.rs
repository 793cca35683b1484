use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{
    AppState,
    middleware::CurrentUser,
    models::{
        ApiError, ApiJson, ApiQuery, ApiResponse, AppointmentListPayload, AppointmentListQuery, AppointmentPayload,
        ErrorResponse, MessageResponse, parse_id,
    },
};
use crate::core::{
    models::{
        appointment::AppointmentView,
        input::{AppointmentInput, AppointmentUpdate},
        page::{Page, PageRequest},
        stats::AppointmentStats,
    },
    services::DEFAULT_APPOINTMENT_PAGE_SIZE,
};

fn list_payload(page: Page<AppointmentView>) -> AppointmentListPayload {
    AppointmentListPayload {
        appointments: page.items,
        pagination: page.pagination,
    }
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Appointments in calendar order", body = ApiResponse<AppointmentListPayload>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_appointments(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    ApiQuery(query): ApiQuery<AppointmentListQuery>,
) -> Result<Json<ApiResponse<AppointmentListPayload>>, ApiError> {
    let filter = query.filter()?;
    let page = PageRequest::new(query.page, query.limit, DEFAULT_APPOINTMENT_PAGE_SIZE);
    let page = service.list_appointments(&actor, &filter, page).await?;
    Ok(Json(ApiResponse::ok(list_payload(page))))
}

#[utoipa::path(
    get,
    path = "/api/appointments/stats",
    tag = "appointments",
    responses(
        (status = 200, description = "Booking statistics", body = ApiResponse<AppointmentStats>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn appointment_stats(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<AppointmentStats>>, ApiError> {
    Ok(Json(ApiResponse::ok(service.appointment_stats(&actor).await?)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/user/{user_id}",
    tag = "appointments",
    params(
        ("user_id" = String, Path, description = "Owner of the appointments"),
        AppointmentListQuery
    ),
    responses(
        (status = 200, description = "The user's appointments", body = ApiResponse<AppointmentListPayload>),
        (status = 403, description = "Neither owner nor admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn user_appointments(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<AppointmentListQuery>,
) -> Result<Json<ApiResponse<AppointmentListPayload>>, ApiError> {
    let user_id = parse_id(&user_id)?;
    let filter = query.filter()?;
    let page = PageRequest::new(query.page, query.limit, DEFAULT_APPOINTMENT_PAGE_SIZE);
    let page = service.user_appointments(&actor, user_id, filter, page).await?;
    Ok(Json(ApiResponse::ok(list_payload(page))))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = ApiResponse<AppointmentPayload>),
        (status = 403, description = "Neither owner nor admin", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_appointment(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AppointmentPayload>>, ApiError> {
    let appointment = service.get_appointment(&actor, parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(AppointmentPayload { appointment })))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "appointments",
    request_body = AppointmentInput,
    responses(
        (status = 201, description = "Appointment booked", body = ApiResponse<AppointmentPayload>),
        (status = 400, description = "Validation error, past date, unknown service or taken slot", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_appointment(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    ApiJson(req): ApiJson<AppointmentInput>,
) -> Result<(StatusCode, Json<ApiResponse<AppointmentPayload>>), ApiError> {
    let appointment = service.create_appointment(&actor, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            AppointmentPayload { appointment },
            "Appointment created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = AppointmentUpdate,
    responses(
        (status = 200, description = "Appointment updated", body = ApiResponse<AppointmentPayload>),
        (status = 400, description = "Validation error, past date or taken slot", body = ErrorResponse),
        (status = 403, description = "Not allowed to edit or to change status", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_appointment(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AppointmentUpdate>,
) -> Result<Json<ApiResponse<AppointmentPayload>>, ApiError> {
    let appointment = service.update_appointment(&actor, parse_id(&id)?, req).await?;
    Ok(Json(ApiResponse::with_message(
        AppointmentPayload { appointment },
        "Appointment updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "appointments",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted", body = MessageResponse),
        (status = 403, description = "Neither owner nor admin", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_appointment(
    State(service): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_appointment(&actor, parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Appointment deleted successfully")))
}
