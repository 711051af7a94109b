//!
//! REST server for the hotel booking and availability engine.
//! Reads configuration from TOML file (~/.config/hotel-booking/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use hotel_booking::application::services::{AvailabilityService, BookingService, PricingService};
use hotel_booking::infrastructure::database::migrator::Migrator;
use hotel_booking::{
    create_api_router, default_config_path, init_database, AppConfig, AppState, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("HOTEL_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Hotel Booking Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install Prometheus metrics recorder: {}", e);
            None
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Repositories and services ──────────────────────────────
    let repos: Arc<dyn hotel_booking::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let availability = Arc::new(AvailabilityService::new(repos.clone()));
    let pricing = Arc::new(PricingService::new(repos.clone()));
    let bookings = Arc::new(BookingService::new(
        repos.clone(),
        availability.clone(),
        pricing,
    ));

    let state = AppState::new(repos, availability, bookings, prometheus_handle);
    let router = create_api_router(state);

    // ── REST server with graceful shutdown ─────────────────────
    let addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Hotel Booking Service shutdown complete");
    Ok(())
}
