use std::net::SocketAddr;

use anyhow::Context;
use shopline_api::{app, state::AppState, telemetry};
use shopline_store::app_config::{Config, StorageBackend};
use shopline_store::{DbClient, Repositories};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    telemetry::init(&config.log);

    tracing::info!("Starting Shopline API on port {}", config.server.port);

    let repos = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Repositories::postgres(&db)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Repositories::in_memory()
        }
    };

    let app = app(AppState::new(repos));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
