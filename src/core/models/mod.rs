pub mod appointment;
pub mod filters;
pub mod input;
pub mod page;
pub mod service;
pub mod stats;
pub mod user;
