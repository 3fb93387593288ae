//! Products API - REST server

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = connect_from_config_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, "products_api").await?;
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let router = create_router(api::routes(&state));

    info!(
        "Starting Products API on port {}",
        state.config.server.port
    );

    let db = state.db.clone();
    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connection pool");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connection pool closed"),
                Err(e) => tracing::warn!("Failed to close PostgreSQL pool: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
