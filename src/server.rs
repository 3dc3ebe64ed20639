//! HTTP server initialization and runtime setup.
//!
//! Handles store and cache selection, migrations, and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::FavoriteRepository;
use crate::infrastructure::cache::{CacheService, FavoritesCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{InMemoryFavoriteRepository, PgFavoriteRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Attempts made to reach PostgreSQL at startup before giving up.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let cache_store = build_cache_store(&config).await;

    let cache = FavoritesCache::new(cache_store, config.cache_settings());
    let state = AppState::new(repository, cache);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Selects the store backend: PostgreSQL when configured, in-memory otherwise.
async fn build_repository(config: &Config) -> Result<Arc<dyn FavoriteRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured, favorites are kept in memory only");
        return Ok(Arc::new(InMemoryFavoriteRepository::new()));
    };

    let pool = connect_pool(config, database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgFavoriteRepository::new(Arc::new(pool))))
}

/// Opens the connection pool, retrying with exponential backoff.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(200)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1);

    Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection attempt failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

/// Selects the raw cache backend: Redis when configured and reachable,
/// the no-op cache otherwise.
async fn build_cache_store(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
