use crate::auth::jwt::JwtService;
use crate::core::errors::SalonError;
use crate::core::models::user::User;
use crate::infrastructure::storage::Storage;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::models::user::UserProfile;

mod appointments;
mod auth;
mod catalog;
mod users;

pub use appointments::DEFAULT_APPOINTMENT_PAGE_SIZE;
pub use catalog::DEFAULT_SERVICE_PAGE_SIZE;
pub use users::DEFAULT_USER_PAGE_SIZE;

/// Outcome of a successful register or login.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

/// Business rules of the salon. Handlers pass the authenticated caller in as `actor`;
/// every role and ownership decision is taken here.
pub struct SalonService<S: Storage> {
    storage: S,
    jwt_service: JwtService,
    bcrypt_cost: u32,
}

impl<S: Storage> SalonService<S> {
    pub fn new(storage: S, jwt_service: JwtService, bcrypt_cost: u32) -> Self {
        SalonService {
            storage,
            jwt_service,
            bcrypt_cost,
        }
    }
}

fn ensure_admin(actor: &User) -> Result<(), SalonError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(SalonError::RoleNotAuthorized(actor.role))
    }
}

fn ensure_owner_or_admin(actor: &User, owner_id: Uuid, action: &'static str) -> Result<(), SalonError> {
    if actor.is_admin() || actor.id == owner_id {
        Ok(())
    } else {
        Err(SalonError::NotAuthorized(action))
    }
}
