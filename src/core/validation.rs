use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::core::errors::{FieldError, SalonError};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern compiles"));

/// Collects every failing field of a request before reporting, so clients get the full list.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Trims `value` and checks its length in characters. Returns the trimmed text.
    pub fn text(&mut self, field: &str, value: &str, min: usize, max: usize, message: &str) -> String {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        self.check(len >= min && len <= max, field, message);
        trimmed.to_string()
    }

    /// Returns the email trimmed and lower-cased.
    pub fn email(&mut self, field: &str, value: &str) -> String {
        let normalized = value.trim().to_lowercase();
        self.check(EMAIL_PATTERN.is_match(&normalized), field, "Please enter a valid email");
        normalized
    }

    pub fn phone(&mut self, field: &str, value: &str) -> String {
        let trimmed = value.trim();
        self.check(PHONE_PATTERN.is_match(trimmed), field, "Please enter a valid phone number");
        trimmed.to_string()
    }

    /// Whole number of minutes within `[min, max]`.
    pub fn minutes(&mut self, field: &str, value: f64, min: u32, max: u32, message: &str) -> u32 {
        let ok = value.is_finite() && value.fract() == 0.0 && value >= f64::from(min) && value <= f64::from(max);
        self.check(ok, field, message);
        if ok { value as u32 } else { min }
    }

    pub fn non_negative(&mut self, field: &str, value: f64, message: &str) -> f64 {
        self.check(value.is_finite() && value >= 0.0, field, message);
        value
    }

    pub fn parse<T: FromStr>(&mut self, field: &str, raw: &str, message: &str) -> Option<T> {
        let parsed = raw.trim().parse::<T>().ok();
        self.check(parsed.is_some(), field, message);
        parsed
    }

    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, which is reduced to its UTC date.
    pub fn date(&mut self, field: &str, raw: &str, message: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc).date_naive()));
        self.check(parsed.is_some(), field, message);
        parsed
    }

    pub fn finish(self) -> Result<(), SalonError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SalonError::Validation(self.errors))
        }
    }
}
