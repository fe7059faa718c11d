use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lodgis_api::{app, AppState};
use lodgis_core::DateRangeValidator;
use lodgis_offer::{AvailabilityService, SearchOrchestrator};
use lodgis_store::{DbClient, PostgresCatalogRepository, PostgresInventoryRepository};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lodgis_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = lodgis_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Lodgis API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let inventory = Arc::new(PostgresInventoryRepository::new(db.pool.clone()));
    let catalog = Arc::new(PostgresCatalogRepository::new(db.pool.clone()));

    let validator = DateRangeValidator {
        max_nights: config.search.max_stay_nights,
        max_horizon_days: config.search.max_horizon_days,
    };

    let state = AppState {
        search: Arc::new(SearchOrchestrator::with_validator(
            inventory.clone(),
            catalog,
            validator.clone(),
        )),
        availability: Arc::new(AvailabilityService::new(inventory)),
        validator,
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
