use tracing::{info, instrument, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::core::errors::SalonError;
use crate::core::models::input::{LoginInput, RegisterInput};
use crate::core::models::user::{Role, User, UserProfile};
use crate::core::services::{AuthSession, SalonService};
use crate::core::validation::Validator;
use crate::infrastructure::storage::Storage;

pub const MIN_PASSWORD_LENGTH: usize = 6;

impl<S: Storage> SalonService<S> {
    /// Creates a regular account and signs the caller in.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, SalonError> {
        let mut v = Validator::new();
        let name = v.text("name", &input.name, 2, 50, "Name must be between 2 and 50 characters");
        let email = v.email("email", &input.email);
        let phone = v.phone("phone", &input.phone);
        v.check(
            input.password.chars().count() >= MIN_PASSWORD_LENGTH,
            "password",
            "Password must be at least 6 characters",
        );
        v.finish()?;

        let password_hash = hash_password(&input.password, self.bcrypt_cost)?;
        let user = self
            .storage
            .create_user(User::new(name, email, phone, password_hash, Role::User))
            .await?;
        info!(user_id = %user.id, "user registered");
        self.session_for(&user)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, SalonError> {
        let mut v = Validator::new();
        let email = v.email("email", &input.email);
        v.check(!input.password.is_empty(), "password", "Password is required");
        v.finish()?;

        let user = self
            .storage
            .get_user_by_email(&email)
            .await?
            .ok_or(SalonError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash)? {
            warn!(user_id = %user.id, "wrong password");
            return Err(SalonError::InvalidCredentials);
        }
        if !user.is_active {
            warn!(user_id = %user.id, "login attempt on deactivated account");
            return Err(SalonError::AccountDeactivated);
        }
        info!(user_id = %user.id, "user logged in");
        self.session_for(&user)
    }

    /// Resolves a bearer token to the current state of its user.
    pub async fn authenticate(&self, token: &str) -> Result<User, SalonError> {
        let claims = self.jwt_service.validate_token(token)?;
        let user = self
            .storage
            .get_user(claims.user_id()?)
            .await?
            .ok_or(SalonError::TokenUserNotFound)?;
        if !user.is_active {
            return Err(SalonError::AccountDeactivated);
        }
        Ok(user)
    }

    fn session_for(&self, user: &User) -> Result<AuthSession, SalonError> {
        let token = self.jwt_service.generate_token(user.id, user.role)?;
        Ok(AuthSession {
            user: UserProfile::from(user),
            token,
        })
    }
}
