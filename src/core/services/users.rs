use chrono::{Duration, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::core::errors::SalonError;
use crate::core::models::{
    filters::UserFilter,
    input::UserUpdate,
    page::{Page, PageRequest},
    stats::UserStats,
    user::{Role, User, UserProfile},
};
use crate::core::services::{SalonService, ensure_admin};
use crate::core::validation::Validator;
use crate::infrastructure::storage::Storage;

pub const DEFAULT_USER_PAGE_SIZE: u32 = 50;
const NEW_USER_WINDOW_DAYS: i64 = 30;

impl<S: Storage> SalonService<S> {
    /// Newest accounts first.
    pub async fn list_users(
        &self,
        actor: &User,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, SalonError> {
        ensure_admin(actor)?;
        let mut users = self.storage.list_users(filter).await?;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::from_sorted(users, page).map(|u| UserProfile::from(&u)))
    }

    pub async fn user_stats(&self, actor: &User) -> Result<UserStats, SalonError> {
        ensure_admin(actor)?;
        let users = self.storage.list_users(&UserFilter::default()).await?;
        let since = Utc::now() - Duration::days(NEW_USER_WINDOW_DAYS);
        Ok(UserStats {
            total_users: users.len(),
            active_users: users.iter().filter(|u| u.is_active).count(),
            admin_users: users.iter().filter(|u| u.role == Role::Admin).count(),
            regular_users: users.iter().filter(|u| u.role == Role::User).count(),
            new_users: users.iter().filter(|u| u.created_at >= since).count(),
        })
    }

    pub async fn get_user(&self, actor: &User, user_id: Uuid) -> Result<UserProfile, SalonError> {
        ensure_admin(actor)?;
        let user = self.load_user(user_id).await?;
        Ok(UserProfile::from(&user))
    }

    #[instrument(skip(self, actor, changes), fields(actor_id = %actor.id))]
    pub async fn update_user(&self, actor: &User, user_id: Uuid, changes: UserUpdate) -> Result<UserProfile, SalonError> {
        ensure_admin(actor)?;

        let mut v = Validator::new();
        let name = changes
            .name
            .as_deref()
            .map(|name| v.text("name", name, 2, 50, "Name must be between 2 and 50 characters"));
        let email = changes.email.as_deref().map(|email| v.email("email", email));
        let phone = changes.phone.as_deref().map(|phone| v.phone("phone", phone));
        let role = changes
            .role
            .as_deref()
            .and_then(|role| v.parse::<Role>("role", role, "Role must be either admin or user"));
        v.finish()?;

        let mut user = self.load_user(user_id).await?;
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(phone) = phone {
            user.phone = phone;
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();

        let user = self.storage.update_user(user).await?;
        info!(user_id = %user.id, role = %user.role, is_active = user.is_active, "user updated");
        Ok(UserProfile::from(&user))
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_user(&self, actor: &User, user_id: Uuid) -> Result<(), SalonError> {
        ensure_admin(actor)?;
        let user = self.load_user(user_id).await?;
        if user.id == actor.id {
            return Err(SalonError::CannotDeleteSelf);
        }
        if !self.storage.delete_user(user.id).await? {
            return Err(SalonError::UserNotFound(user.id));
        }
        info!(user_id = %user.id, "user deleted");
        Ok(())
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, SalonError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or(SalonError::UserNotFound(user_id))
    }
}
