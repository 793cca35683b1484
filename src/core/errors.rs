use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::core::models::user::Role;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SalonError {
    #[error("Validation Error")]
    Validation(Vec<FieldError>),
    #[error("Invalid ID format")]
    InvalidId(String),
    #[error("User already exists with this email")]
    EmailAlreadyRegistered(String),
    #[error("Email already exists")]
    EmailAlreadyExists(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account has been deactivated")]
    AccountDeactivated,
    #[error("Not authorized, no token")]
    MissingToken,
    #[error("Not authorized, token failed")]
    InvalidToken(String),
    #[error("Not authorized, user not found")]
    TokenUserNotFound,
    #[error("User role {0} is not authorized to access this route")]
    RoleNotAuthorized(Role),
    #[error("Not authorized to {0}")]
    NotAuthorized(&'static str),
    #[error("Only admins can change appointment status")]
    StatusChangeForbidden,
    #[error("Cannot delete your own account")]
    CannotDeleteSelf,
    #[error("User not found")]
    UserNotFound(Uuid),
    #[error("Service not found")]
    ServiceNotFound(Uuid),
    /// A booking referenced a service id that does not resolve.
    #[error("Service not found")]
    UnknownService(Uuid),
    #[error("Appointment not found")]
    AppointmentNotFound(Uuid),
    #[error("Appointment date must be in the future")]
    PastAppointmentDate,
    #[error("Time slot is not available")]
    SlotUnavailable,
    #[error("Too many requests from this IP, please try again later.")]
    RateLimited,
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl SalonError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        SalonError::Validation(vec![FieldError::new(field, message)])
    }
}
