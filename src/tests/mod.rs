mod appointment_tests;

use crate::auth::jwt::JwtService;
use crate::core::models::input::{RegisterInput, ServiceInput};
use crate::core::models::service::ServiceView;
use crate::core::models::user::{Role, User};
use crate::core::services::SalonService;
use crate::infrastructure::storage::{Storage, in_memory::InMemoryStorage};
use chrono::{Duration as Days, NaiveDate, Utc};
use std::time::Duration;

pub fn create_test_service() -> SalonService<InMemoryStorage> {
    create_test_service_with_storage().0
}

/// The returned storage shares its maps with the service, so tests can plant records directly.
pub fn create_test_service_with_storage() -> (SalonService<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    let jwt = JwtService::new("test-secret".to_string(), Duration::from_secs(3600));
    (SalonService::new(storage.clone(), jwt, 4), storage)
}

pub fn register_input(name: &str, email: &str) -> RegisterInput {
    RegisterInput {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+905551234567".to_string(),
        password: "secret123".to_string(),
    }
}

/// Registers through the public flow and returns the stored account.
pub async fn register_user(service: &SalonService<InMemoryStorage>, name: &str, email: &str) -> User {
    let session = service.register(register_input(name, email)).await.unwrap();
    service.authenticate(&session.token).await.unwrap()
}

pub async fn create_admin(storage: &InMemoryStorage) -> User {
    storage
        .create_user(User::new(
            "Salon Admin".to_string(),
            "admin@salon.test".to_string(),
            "+905550000000".to_string(),
            "not-a-real-hash".to_string(),
            Role::Admin,
        ))
        .await
        .unwrap()
}

pub fn service_input(name: &str, duration: f64, price: f64, category: &str) -> ServiceInput {
    ServiceInput {
        name: name.to_string(),
        description: format!("{} performed by a senior stylist", name),
        duration: Some(duration),
        price: Some(price),
        category: Some(category.to_string()),
    }
}

pub async fn create_catalog_service(
    service: &SalonService<InMemoryStorage>,
    admin: &User,
    name: &str,
    duration: f64,
) -> ServiceView {
    service
        .create_service(admin, service_input(name, duration, 45.0, "hair"))
        .await
        .unwrap()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Days::days(days)
}
