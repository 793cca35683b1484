pub mod errors;
pub mod models;
pub mod schedule;
pub mod services;
pub mod validation;
