use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info, warn};

use blog_api::{build_router, AppState};
use blog_infrastructure::{bootstrap_schema, create_pool, seed_defaults, Repositories};
use blog_shared::config::{AppConfig, DatabaseSettings, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = blog_shared::telemetry::init_telemetry();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("{} starting ({})", config.app.name, config.app.env);

    // Storage: MySQL, or the in-memory store when configured or unreachable
    let (repos, mock_data) = match config.database.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            (Repositories::memory(), true)
        }
        StorageBackend::Mysql => match connect_mysql(&config.database).await {
            Ok(repos) => (repos, false),
            Err(e) => {
                warn!("MySQL unavailable ({:#}), falling back to in-memory storage", e);
                (Repositories::memory(), true)
            }
        },
    };

    let report = seed_defaults(&repos, &config.seed)
        .await
        .context("Failed to seed default data")?;
    info!(
        "Seed complete: admin_created={} navigation_items={} articles={}",
        report.admin_created, report.navigation_items, report.articles
    );

    // Build router
    let state = AppState::new(repos.users, repos.articles, repos.navigation, &config.jwt, mock_data);
    let app = build_router(state, &config.app);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse().context("Invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_mysql(settings: &DatabaseSettings) -> anyhow::Result<Repositories> {
    info!("Connecting to database...");
    let pool = create_pool(settings).await.context("connect")?;
    bootstrap_schema(&pool).await.context("schema bootstrap")?;
    info!("Database connection established.");
    Ok(Repositories::mysql(pool))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
