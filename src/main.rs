use salonbase::api::app;
use salonbase::auth::jwt::JwtService;
use salonbase::config::CONFIG;
use salonbase::core::services::SalonService;
use salonbase::infrastructure::{seed::seed_demo_data, storage::in_memory::InMemoryStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&CONFIG.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(config = ?*CONFIG, "starting SalonBase API");

    let storage = InMemoryStorage::new();
    if CONFIG.seed_demo_data {
        seed_demo_data(&storage, CONFIG.bcrypt_cost).await?;
    }

    let jwt_service = JwtService::new(CONFIG.jwt_secret.clone(), CONFIG.jwt_ttl);
    let service = Arc::new(SalonService::new(storage, jwt_service, CONFIG.bcrypt_cost));
    let app = app(service, &CONFIG);

    let addr: SocketAddr = format!("{}:{}", CONFIG.host, CONFIG.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on {}", addr);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
