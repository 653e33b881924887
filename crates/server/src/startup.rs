use std::{net::SocketAddr, sync::Arc};

use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::provider::{ProviderRepository, SeaOrmProviderRepository};
use tracing::{error, info};

use crate::routes::{self, AppState};

/// Open the process-wide connection. Failures are logged and never retried;
/// the listener still starts and requests then fail with the store's error.
pub async fn connect_database(cfg: &DatabaseConfig) -> DatabaseConnection {
    let db = match models::db::connect_with_config(cfg).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "database connection failed; serving without a store");
            return DatabaseConnection::Disconnected;
        }
    };

    if let Err(e) = models::db::ping(&db).await {
        error!(error = %e, "database unreachable at startup");
        return db;
    }
    info!("database connected");

    if cfg.run_migrations {
        match migration::Migrator::up(&db, None).await {
            Ok(()) => info!("migrations applied"),
            Err(e) => error!(error = %e, "migrations failed"),
        }
    }
    db
}

/// Build the app from configuration and serve until the listener stops.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_database(&cfg.database).await;
    let repo: Arc<dyn ProviderRepository> = Arc::new(SeaOrmProviderRepository::new(db));
    let state = AppState::new(repo);

    let cors = routes::build_cors(&cfg.server.cors_origins);
    let app = routes::build_router(state, cors);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, origins = ?cfg.server.cors_origins, "backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
