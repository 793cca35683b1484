//! Request payloads accepted by [`crate::core::services::SalonService`].
//!
//! Fields arrive loosely typed (plain strings and numbers) and are checked by the service with
//! [`crate::core::validation::Validator`], so a client gets one message per bad field instead of
//! a deserialisation failure.

use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterInput {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "+905551234567")]
    pub phone: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginInput {
    #[schema(example = "admin@salon.com")]
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Admin edit of an account. Absent fields stay unchanged.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "admin")]
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ServiceInput {
    #[schema(example = "Haircut & Styling")]
    pub name: String,
    pub description: String,
    /// Minutes, 5 to 480.
    #[schema(example = 60)]
    pub duration: Option<f64>,
    #[schema(example = 45.0)]
    pub price: Option<f64>,
    #[schema(example = "hair")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<f64>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentInput {
    #[schema(example = "Haircut & Styling")]
    pub service: String,
    pub service_id: Option<String>,
    #[schema(example = "2030-06-01")]
    pub date: String,
    #[schema(example = "10:30")]
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AppointmentUpdate {
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[schema(example = "confirmed")]
    pub status: Option<String>,
    pub notes: Option<String>,
}
