use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::models::{
    appointment::{Appointment, AppointmentStatus},
    service::{Category, Service},
    user::{Role, User},
};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    /// Lower-cased substring matched against name and email.
    pub search: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|role| user.role == role)
            && self.is_active.is_none_or(|active| user.is_active == active)
            && self
                .search
                .as_deref()
                .is_none_or(|s| contains_ci(&user.name, s) || contains_ci(&user.email, s))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ServiceFilter {
    pub is_active: Option<bool>,
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl ServiceFilter {
    pub fn matches(&self, service: &Service) -> bool {
        self.is_active.is_none_or(|active| service.is_active == active)
            && self.category.is_none_or(|category| service.category == category)
            && self
                .search
                .as_deref()
                .is_none_or(|s| contains_ci(&service.name, s) || contains_ci(&service.description, s))
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppointmentFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.user_id.is_none_or(|id| appointment.user_id == id)
            && self.status.is_none_or(|status| appointment.status == status)
            && self.date.is_none_or(|date| appointment.date == date)
            && self
                .search
                .as_deref()
                .is_none_or(|s| contains_ci(&appointment.user_name, s) || contains_ci(&appointment.service, s))
    }
}

/// Normalises a free-text search parameter; blank input means "no filter".
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase)
}
