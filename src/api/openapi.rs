use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        AppointmentListPayload, AppointmentPayload, ErrorResponse, HealthResponse, MessageResponse,
        ServiceListPayload, ServicePayload, UserListPayload, UserPayload,
    },
    core::{
        models::{
            appointment::{Appointment, AppointmentStatus, AppointmentView},
            input::{AppointmentInput, AppointmentUpdate, LoginInput, RegisterInput, ServiceInput, ServiceUpdate, UserUpdate},
            page::Pagination,
            service::{Category, Service, ServiceSummary, ServiceView},
            stats::{AppointmentStats, CategoryStats, ServiceStats, UserStats},
            user::{Role, UserProfile},
        },
        services::AuthSession,
    },
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health,
        super::handlers::auth::register,
        super::handlers::auth::login,
        super::handlers::auth::me,
        super::handlers::users::list_users,
        super::handlers::users::user_stats,
        super::handlers::users::get_user,
        super::handlers::users::update_user,
        super::handlers::users::delete_user,
        super::handlers::catalog::list_services,
        super::handlers::catalog::service_stats,
        super::handlers::catalog::get_service,
        super::handlers::catalog::create_service,
        super::handlers::catalog::update_service,
        super::handlers::catalog::delete_service,
        super::handlers::appointments::list_appointments,
        super::handlers::appointments::appointment_stats,
        super::handlers::appointments::user_appointments,
        super::handlers::appointments::get_appointment,
        super::handlers::appointments::create_appointment,
        super::handlers::appointments::update_appointment,
        super::handlers::appointments::delete_appointment
    ),
    components(schemas(
        RegisterInput,
        LoginInput,
        UserUpdate,
        ServiceInput,
        ServiceUpdate,
        AppointmentInput,
        AppointmentUpdate,
        AuthSession,
        UserProfile,
        Role,
        Service,
        ServiceView,
        ServiceSummary,
        Category,
        Appointment,
        AppointmentView,
        AppointmentStatus,
        Pagination,
        UserStats,
        ServiceStats,
        CategoryStats,
        AppointmentStats,
        UserPayload,
        UserListPayload,
        ServicePayload,
        ServiceListPayload,
        AppointmentPayload,
        AppointmentListPayload,
        MessageResponse,
        HealthResponse,
        ErrorResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Account administration"),
        (name = "services", description = "Salon service catalog"),
        (name = "appointments", description = "Bookings")
    ),
    info(
        title = "SalonBase API",
        description = "Appointment booking backend for a beauty salon",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
