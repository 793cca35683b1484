use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::models::service::ServiceSummary;

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * 60;

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern compiles"));

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl FromStr for AppointmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            _ => Err(()),
        }
    }
}

/// Wall-clock time of an appointment, serialised as zero-padded `HH:MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(TimeOfDay { hour, minute })
    }

    pub fn from_minute_of_day(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        TimeOfDay {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    pub fn minute_of_day(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    /// Accepts `H:MM` and `HH:MM` in 24h notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = TIME_PATTERN.captures(s).ok_or(())?;
        let hour = caps[1].parse::<u8>().map_err(|_| ())?;
        let minute = caps[2].parse::<u8>().map_err(|_| ())?;
        TimeOfDay::new(hour, minute).ok_or(())
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid time `{}`, expected HH:MM", raw)))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_phone: String,
    /// Display name of the booked service.
    pub service: String,
    pub service_id: Option<Uuid>,
    #[schema(value_type = String, format = Date, example = "2030-06-01")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "10:30")]
    pub time: TimeOfDay,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub duration: u32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn end_time(&self) -> TimeOfDay {
        TimeOfDay::from_minute_of_day(self.time.minute_of_day() + self.duration)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    #[schema(value_type = String, example = "11:30")]
    pub end_time: TimeOfDay,
    pub service_details: Option<ServiceSummary>,
}

impl AppointmentView {
    pub fn new(appointment: Appointment, service_details: Option<ServiceSummary>) -> Self {
        let end_time = appointment.end_time();
        AppointmentView {
            appointment,
            end_time,
            service_details,
        }
    }
}
