use tracing::info;

use crate::auth::password::hash_password;
use crate::core::errors::SalonError;
use crate::core::models::{
    filters::UserFilter,
    service::{Category, Service},
    user::{Role, User},
};
use crate::infrastructure::storage::Storage;

struct DemoUser {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    password: &'static str,
    role: Role,
}

const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        name: "Admin User",
        email: "admin@salonbase.com",
        phone: "+905551234567",
        password: "admin123",
        role: Role::Admin,
    },
    DemoUser {
        name: "John Doe",
        email: "john@example.com",
        phone: "+905551234568",
        password: "user123",
        role: Role::User,
    },
    DemoUser {
        name: "Jane Smith",
        email: "jane@example.com",
        phone: "+905551234569",
        password: "user123",
        role: Role::User,
    },
];

// (name, description, minutes, price, category)
const DEMO_SERVICES: [(&str, &str, u32, f64, Category); 8] = [
    (
        "Haircut & Styling",
        "Professional cut and styling for every hair type",
        60,
        45.0,
        Category::Hair,
    ),
    ("Hair Colouring", "Full colour treatment with premium products", 120, 85.0, Category::Hair),
    ("Manicure", "Classic manicure with nail shaping and polish", 45, 25.0, Category::Nails),
    ("Pedicure", "Relaxing pedicure with foot massage and polish", 60, 35.0, Category::Nails),
    ("Facial Care", "Deep cleansing facial with a hydrating mask", 75, 55.0, Category::Facial),
    ("Swedish Massage", "Relaxing full body massage for stress relief", 90, 75.0, Category::Massage),
    ("Brow Shaping", "Professional eyebrow shaping and tinting", 30, 20.0, Category::Other),
    ("Make-up", "Professional make-up for special occasions", 60, 65.0, Category::Other),
];

/// Fills an empty store with demo accounts and services. Returns `false` when users already exist.
pub async fn seed_demo_data<S: Storage>(storage: &S, bcrypt_cost: u32) -> Result<bool, SalonError> {
    if !storage.list_users(&UserFilter::default()).await?.is_empty() {
        info!("store already populated, skipping demo data");
        return Ok(false);
    }

    for demo in &DEMO_USERS {
        let password_hash = hash_password(demo.password, bcrypt_cost)?;
        storage
            .create_user(User::new(
                demo.name.to_string(),
                demo.email.to_string(),
                demo.phone.to_string(),
                password_hash,
                demo.role,
            ))
            .await?;
        info!(email = demo.email, password = demo.password, role = %demo.role, "demo account");
    }
    for (name, description, duration, price, category) in DEMO_SERVICES {
        storage
            .save_service(Service::new(name.to_string(), description.to_string(), duration, price, category))
            .await?;
    }

    info!(users = DEMO_USERS.len(), services = DEMO_SERVICES.len(), "demo data seeded");
    Ok(true)
}
