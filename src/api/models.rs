use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::{
    errors::SalonError,
    models::{
        appointment::{AppointmentStatus, AppointmentView},
        filters::{AppointmentFilter, ServiceFilter, UserFilter, search_term},
        page::Pagination,
        service::{Category, ServiceView},
        user::{Role, UserProfile},
    },
    validation::Validator,
};

/// Success envelope shared by every endpoint.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: &str) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            success: true,
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct UserPayload {
    pub user: UserProfile,
}

#[derive(Serialize, ToSchema)]
pub struct UserListPayload {
    pub users: Vec<UserProfile>,
    pub pagination: Pagination,
}

#[derive(Serialize, ToSchema)]
pub struct ServicePayload {
    pub service: ServiceView,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceListPayload {
    pub services: Vec<ServiceView>,
    pub pagination: Pagination,
}

#[derive(Serialize, ToSchema)]
pub struct AppointmentPayload {
    pub appointment: AppointmentView,
}

#[derive(Serialize, ToSchema)]
pub struct AppointmentListPayload {
    pub appointments: Vec<AppointmentView>,
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// `admin` or `user`.
    pub role: Option<String>,
    pub is_active: Option<bool>,
    /// Case-insensitive match on name or email.
    pub search: Option<String>,
}

impl UserListQuery {
    pub fn filter(&self) -> Result<UserFilter, SalonError> {
        let mut v = Validator::new();
        let role = self
            .role
            .as_deref()
            .and_then(|r| v.parse::<Role>("role", r, "Role must be either admin or user"));
        v.finish()?;
        Ok(UserFilter {
            role,
            is_active: self.is_active,
            search: search_term(self.search.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub is_active: Option<bool>,
    pub category: Option<String>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
}

impl ServiceListQuery {
    pub fn filter(&self) -> Result<ServiceFilter, SalonError> {
        let mut v = Validator::new();
        let category = self
            .category
            .as_deref()
            .and_then(|c| v.parse::<Category>("category", c, "Invalid category"));
        v.finish()?;
        Ok(ServiceFilter {
            is_active: self.is_active,
            category,
            search: search_term(self.search.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Case-insensitive match on customer name or service.
    pub search: Option<String>,
}

impl AppointmentListQuery {
    pub fn filter(&self) -> Result<AppointmentFilter, SalonError> {
        let mut v = Validator::new();
        let status = self
            .status
            .as_deref()
            .and_then(|s| v.parse::<AppointmentStatus>("status", s, "Invalid status"));
        let date = self
            .date
            .as_deref()
            .and_then(|d| v.date("date", d, "Please enter a valid date"));
        v.finish()?;
        Ok(AppointmentFilter {
            user_id: None,
            status,
            date,
            search: search_term(self.search.as_deref()),
        })
    }
}

/// Path ids arrive as text so a malformed one can be reported in the usual envelope.
pub fn parse_id(raw: &str) -> Result<Uuid, SalonError> {
    Uuid::parse_str(raw).map_err(|_| SalonError::InvalidId(raw.to_string()))
}

/// `axum::Json` whose rejections use the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` whose rejections use the API error envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

pub struct ApiError(pub SalonError);

impl From<SalonError> for ApiError {
    fn from(err: SalonError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(SalonError::invalid("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(SalonError::invalid("query", rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SalonError::Validation(_)
            | SalonError::InvalidId(_)
            | SalonError::EmailAlreadyRegistered(_)
            | SalonError::EmailAlreadyExists(_)
            | SalonError::CannotDeleteSelf
            | SalonError::UnknownService(_)
            | SalonError::PastAppointmentDate
            | SalonError::SlotUnavailable => StatusCode::BAD_REQUEST,
            SalonError::InvalidCredentials
            | SalonError::AccountDeactivated
            | SalonError::MissingToken
            | SalonError::InvalidToken(_)
            | SalonError::TokenUserNotFound => StatusCode::UNAUTHORIZED,
            SalonError::RoleNotAuthorized(_) | SalonError::NotAuthorized(_) | SalonError::StatusChangeForbidden => {
                StatusCode::FORBIDDEN
            }
            SalonError::UserNotFound(_) | SalonError::ServiceNotFound(_) | SalonError::AppointmentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SalonError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SalonError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self.0 {
            SalonError::Validation(errors) => ErrorResponse {
                success: false,
                message: "Validation Error".to_string(),
                error: Some(errors.into_iter().map(|e| e.message).collect()),
            },
            err @ SalonError::InternalServerError(_) => {
                error!(error = %err, "request failed");
                ErrorResponse {
                    success: false,
                    message: "Internal Server Error".to_string(),
                    error: None,
                }
            }
            err => ErrorResponse {
                success: false,
                message: err.to_string(),
                error: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
