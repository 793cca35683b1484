use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 480;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hair,
    Nails,
    Facial,
    Massage,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hair => "hair",
            Category::Nails => "nails",
            Category::Facial => "facial",
            Category::Massage => "massage",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hair" => Ok(Category::Hair),
            "nails" => Ok(Category::Nails),
            "facial" => Ok(Category::Facial),
            "massage" => Ok(Category::Massage),
            "other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

/// A bookable offering of the salon.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: u32,
    pub price: f64,
    pub category: Category,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn new(name: String, description: String, duration: u32, price: f64, category: Category) -> Self {
        let now = Utc::now();
        Service {
            id: Uuid::new_v4(),
            name,
            description,
            duration,
            price,
            category,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Formats a duration in minutes as `"1h 30m"`, `"2h"` or `"45m"`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    #[serde(flatten)]
    pub service: Service,
    pub duration_formatted: String,
}

impl From<Service> for ServiceView {
    fn from(service: Service) -> Self {
        let duration_formatted = format_duration(service.duration);
        ServiceView {
            service,
            duration_formatted,
        }
    }
}

/// The subset of a service embedded in appointment responses.
#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub duration: u32,
}

impl From<&Service> for ServiceSummary {
    fn from(service: &Service) -> Self {
        ServiceSummary {
            id: service.id,
            name: service.name.clone(),
            price: service.price,
            duration: service.duration,
        }
    }
}
