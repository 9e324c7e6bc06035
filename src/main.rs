use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use school_portal::config::AppConfig;
use school_portal::store::MongoStore;
use school_portal::{db, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let database = db::connect(&config.mongodb_uri, &config.database_name).await?;
    tracing::info!(database = %config.database_name, "Connected to MongoDB");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState {
        store: Arc::new(MongoStore::new(database)),
        config,
    };

    tracing::info!(host = %addr, "Starting school portal API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
