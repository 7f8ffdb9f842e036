// Aster API Server
// REST backend for membership and animal-record management

mod config;
mod handlers;
mod middleware;
mod routes;

use config::Config;
use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub credentials: aster_auth::CredentialService,
    pub guard: aster_auth::AccessGuard,
    pub organizations: aster_database::OrganizationRepository,
    pub memberships: aster_database::MembershipRepository,
    pub animals: aster_database::AnimalRepository,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,aster_api=debug".to_string()),
        )
        .init();

    tracing::info!("🐾 Starting Aster API server");

    // Load configuration
    let config = Config::from_env();
    tracing::info!("🔌 Server: {}:{}", config.server_host, config.server_port);

    // Initialize database
    tracing::info!("🗄️  Connecting to database...");
    let database = aster_database::Database::new(config.database.clone())
        .await
        .expect("Failed to connect to database");
    database.ping().await.expect("Database ping failed");
    tracing::info!("✅ Database connected");

    // Wire services off the shared pool
    let pool = database.pool().clone();
    let jwt = aster_auth::JwtService::new(&config.jwt_secret);
    let credentials = aster_auth::CredentialService::new(database.clone(), jwt);
    let guard = aster_auth::AccessGuard::new(pool.clone());

    let state = Arc::new(AppState {
        credentials,
        guard,
        organizations: aster_database::OrganizationRepository::new(pool.clone()),
        memberships: aster_database::MembershipRepository::new(pool.clone()),
        animals: aster_database::AnimalRepository::new(pool),
    });

    // Create router
    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("✅ Aster API listening at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
