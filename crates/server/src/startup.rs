use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StoreBackend};
use migration::MigratorTrait;
use service::articles::{ArticleService, ArticleStore, InMemoryArticleStore, SeaOrmArticleStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the article store selected by `store.backend`.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn ArticleStore>, StartupError> {
    match cfg.store.backend {
        StoreBackend::Memory => {
            let store = if cfg.store.seed_samples {
                InMemoryArticleStore::with_samples()
            } else {
                InMemoryArticleStore::new()
            };
            info!(backend = "memory", seeded = cfg.store.seed_samples, "article store ready");
            Ok(Arc::new(store))
        }
        StoreBackend::Database => {
            cfg.database.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
                info!("database migrations applied");
            }
            info!(backend = "database", "article store ready");
            Ok(Arc::new(SeaOrmArticleStore::new(db)))
        }
    }
}

pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let store = build_store(cfg).await?;
    Ok(ServerState { articles: ArticleService::new(store) })
}

/// Router for a fully configured application.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors(), cfg.server.swagger))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            error!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

/// Build the app and serve it until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let host = cfg.server.host.as_str();
    let listener = TcpListener::bind((host, cfg.server.port))
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {host}:{}: {e}", cfg.server.port)))?;
    let addr = listener.local_addr()?;
    info!(%addr, swagger = cfg.server.swagger, "starting articles api");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
