use crate::core::errors::SalonError;
use crate::core::models::{
    appointment::Appointment,
    filters::{AppointmentFilter, ServiceFilter, UserFilter},
    service::Service,
    user::User,
};
use crate::core::schedule::find_conflict;
use crate::infrastructure::storage::{SlotCheck, Storage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Process-local store. Locks are always taken in field order to stay deadlock free.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users_by_email: Arc<RwLock<HashMap<String, Uuid>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    services: Arc<RwLock<HashMap<Uuid, Service>>>,
    appointments: Arc<RwLock<HashMap<Uuid, Appointment>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, SalonError> {
        let mut users_by_email = self.users_by_email.write().await;
        if users_by_email.contains_key(&user.email) {
            return Err(SalonError::EmailAlreadyRegistered(user.email));
        }
        users_by_email.insert(user.email.clone(), user.id);
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, SalonError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        let previous_email = users
            .get(&user.id)
            .map(|existing| existing.email.clone())
            .ok_or(SalonError::UserNotFound(user.id))?;

        if previous_email != user.email {
            if users_by_email.get(&user.email).is_some_and(|owner| *owner != user.id) {
                return Err(SalonError::EmailAlreadyExists(user.email));
            }
            users_by_email.remove(&previous_email);
            users_by_email.insert(user.email.clone(), user.id);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, SalonError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, SalonError> {
        let users_by_email = self.users_by_email.read().await;
        let users = self.users.read().await;
        Ok(users_by_email.get(email).and_then(|id| users.get(id)).cloned())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, SalonError> {
        let mut users_by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        match users.remove(&user_id) {
            Some(user) => {
                users_by_email.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, SalonError> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| filter.matches(u)).cloned().collect())
    }

    async fn save_service(&self, service: Service) -> Result<Service, SalonError> {
        let mut services = self.services.write().await;
        services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>, SalonError> {
        let services = self.services.read().await;
        Ok(services.get(&service_id).cloned())
    }

    async fn delete_service(&self, service_id: Uuid) -> Result<bool, SalonError> {
        let mut services = self.services.write().await;
        Ok(services.remove(&service_id).is_some())
    }

    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>, SalonError> {
        let services = self.services.read().await;
        Ok(services.values().filter(|s| filter.matches(s)).cloned().collect())
    }

    async fn save_appointment(&self, appointment: Appointment, check: SlotCheck) -> Result<Appointment, SalonError> {
        let mut appointments = self.appointments.write().await;
        if check == SlotCheck::RejectOverlap {
            if let Some(clash) = find_conflict(&appointment, appointments.values()) {
                debug!(
                    appointment_id = %appointment.id,
                    conflicting_id = %clash.id,
                    date = %appointment.date,
                    time = %appointment.time,
                    "slot already taken"
                );
                return Err(SalonError::SlotUnavailable);
            }
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn get_appointment(&self, appointment_id: Uuid) -> Result<Option<Appointment>, SalonError> {
        let appointments = self.appointments.read().await;
        Ok(appointments.get(&appointment_id).cloned())
    }

    async fn delete_appointment(&self, appointment_id: Uuid) -> Result<bool, SalonError> {
        let mut appointments = self.appointments.write().await;
        Ok(appointments.remove(&appointment_id).is_some())
    }

    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, SalonError> {
        let appointments = self.appointments.read().await;
        Ok(appointments.values().filter(|a| filter.matches(a)).cloned().collect())
    }
}
