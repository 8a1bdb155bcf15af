//! HTTP server initialization and runtime setup.
//!
//! Opens the geolocation database, connects the cache, and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::{CacheDriver, Config};
use crate::domain::repositories::GeoLookup;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::geoip::MaxMindGeoLookup;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - MaxMind database reader
/// - Redis cache (or the in-memory cache when configured)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The database file cannot be opened
/// - Redis is unreachable or rejects the PING
/// - Server bind fails
/// - Server runtime error occurs
///
/// No request is served unless both collaborators initialized.
pub async fn run(config: Config) -> Result<()> {
    let geo = open_geoip(&config)?;
    let cache = connect_cache(&config).await?;

    let state = AppState::new(geo, cache, config.resolver_settings());
    let app = app_router(state);

    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.server.listen))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn open_geoip(config: &Config) -> Result<Arc<dyn GeoLookup>> {
    let geo = MaxMindGeoLookup::from_file(&config.geoip.db_path)
        .context("Failed to open GeoIP database")?;

    let meta = geo.metadata();
    tracing::info!(
        "GeoIP database initialized: {} (IPv{}, built {})",
        meta.database_type,
        meta.ip_version,
        meta.build_epoch
    );

    Ok(Arc::new(geo))
}

async fn connect_cache(config: &Config) -> Result<Arc<dyn CacheService>> {
    match config.cache.driver {
        CacheDriver::Redis => {
            let redis = RedisCache::connect(&config.cache.redis_url(), &config.cache.key_prefix)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Cache enabled (Redis)");
            Ok(Arc::new(redis))
        }
        CacheDriver::Memory => {
            tracing::info!("Cache enabled (in-memory)");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

/// Resolves when the process receives Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
