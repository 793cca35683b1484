use serde::Serialize;
use utoipa::ToSchema;

use crate::core::models::service::Category;

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub active_users: usize,
    pub admin_users: usize,
    pub regular_users: usize,
    /// Accounts created in the last 30 days.
    pub new_users: usize,
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub avg_price: f64,
    pub avg_duration: f64,
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    pub total_services: usize,
    pub active_services: usize,
    pub inactive_services: usize,
    pub category_stats: Vec<CategoryStats>,
    pub avg_price: f64,
    pub avg_duration: f64,
}

#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStats {
    pub total_appointments: usize,
    pub pending_appointments: usize,
    pub confirmed_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    pub today_appointments: usize,
    pub weekly_appointments: usize,
    pub total_revenue: f64,
    pub avg_appointment_value: f64,
}

/// Mean of the values, or 0 for an empty input.
pub fn average(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
