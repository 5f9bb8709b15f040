//! Equipment Server
//!
//! REST API server for equipment check-out and check-in.

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equipment_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("equipment_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Equipment Server v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.accounts.is_empty() {
        tracing::warn!("No staff accounts configured, nobody will be able to log in");
    }

    let repository = if config.database.in_memory {
        tracing::warn!("Using the in-memory store, data is lost on restart");
        Repository::in_memory()
    } else {
        // Create database connection pool
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .connect(&config.database.url)
            .await?;

        tracing::info!("Connected to database");

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Repository::new(pool)
    };

    // Save server address before moving config
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create services and application state
    let services = Services::from_config(repository, config.auth.clone());
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
