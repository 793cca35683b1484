use crate::core::errors::SalonError;
use crate::core::models::{
    appointment::Appointment,
    filters::{AppointmentFilter, ServiceFilter, UserFilter},
    service::Service,
    user::User,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Whether [`Storage::save_appointment`] must verify the slot is free before writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotCheck {
    Skip,
    RejectOverlap,
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Fails with `EmailAlreadyRegistered` when the email is taken.
    async fn create_user(&self, user: User) -> Result<User, SalonError>;
    /// Fails with `EmailAlreadyExists` when the new email belongs to someone else.
    async fn update_user(&self, user: User) -> Result<User, SalonError>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, SalonError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, SalonError>;
    async fn delete_user(&self, user_id: Uuid) -> Result<bool, SalonError>;
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, SalonError>;

    async fn save_service(&self, service: Service) -> Result<Service, SalonError>;
    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>, SalonError>;
    async fn delete_service(&self, service_id: Uuid) -> Result<bool, SalonError>;
    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>, SalonError>;

    /// Inserts or replaces an appointment. With [`SlotCheck::RejectOverlap`] the conflict check and
    /// the write happen atomically, failing with `SlotUnavailable` on a clash.
    async fn save_appointment(&self, appointment: Appointment, check: SlotCheck) -> Result<Appointment, SalonError>;
    async fn get_appointment(&self, appointment_id: Uuid) -> Result<Option<Appointment>, SalonError>;
    async fn delete_appointment(&self, appointment_id: Uuid) -> Result<bool, SalonError>;
    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, SalonError>;
}

pub mod in_memory;
