//! Application wiring and lifecycle.

use crate::startup::print_startup_info;
use axum::Router;
use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{create_pool, DatabasePoolInterface, PostgresProductRepository};
use catalog_rest::{create_router, AppState};
use catalog_service::{
    metrics::register_metrics, CacheInterface, CacheSettings, DependencyHealthCheck,
    ProductServiceImpl, RedisCacheService,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

/// Builds the shared state from configuration.
///
/// The cache is created lazily so an unreachable Redis does not block
/// startup; the database must be reachable.
pub fn build_state(
    config: &AppConfig,
    pool: Arc<dyn DatabasePoolInterface>,
) -> CatalogResult<AppState> {
    let cache: Arc<dyn CacheInterface> = Arc::new(RedisCacheService::from_config(&config.redis)?);
    let repository = Arc::new(PostgresProductRepository::new(Arc::clone(&pool)));

    let product_service = Arc::new(ProductServiceImpl::new(
        Arc::clone(&cache),
        repository,
        CacheSettings::from(&config.cache),
    ));
    let health = Arc::new(DependencyHealthCheck::new(pool, cache));

    Ok(AppState::new(product_service, health))
}

/// Runs the server until `shutdown` resolves, then drains and closes the pool.
pub async fn run<F>(config: AppConfig, shutdown: F) -> CatalogResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    register_metrics();

    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let pool: Arc<dyn DatabasePoolInterface> = db_pool.clone();
    let state = build_state(&config, pool)?;
    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| CatalogError::Internal(format!("Failed to read bound address: {}", e)))?;

    info!("Starting REST server on http://{}", local_addr);
    print_startup_info(local_addr);

    let result = serve_with_grace(listener, router, shutdown, config.server.shutdown_grace()).await;

    db_pool.close().await;
    info!("Server shutdown complete");
    result
}

/// Serves `router` until `shutdown` resolves.
///
/// Once signalled the listener stops accepting connections and in-flight
/// requests get `grace` to finish; anything still running after that is
/// aborted.
pub async fn serve_with_grace<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    grace: Duration,
) -> CatalogResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => return server_outcome(joined),
        () = shutdown => {}
    }

    info!(grace_secs = grace.as_secs(), "Draining in-flight requests");
    let _ = stop_tx.send(true);

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => server_outcome(joined),
        Err(_) => {
            warn!("Shutdown grace period elapsed, aborting remaining requests");
            server.abort();
            Ok(())
        }
    }
}

fn server_outcome(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> CatalogResult<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(CatalogError::Internal(format!("REST server error: {}", e))),
        Err(e) => Err(CatalogError::Internal(format!("REST server task failed: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::net::SocketAddr;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;

    fn slow_router(delay: Duration) -> Router {
        Router::new().route(
            "/slow",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "done"
            }),
        )
    }

    async fn start(
        delay: Duration,
        grace: Duration,
    ) -> (
        SocketAddr,
        oneshot::Sender<()>,
        tokio::task::JoinHandle<CatalogResult<()>>,
    ) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_with_grace(
            listener,
            slow_router(delay),
            async move {
                let _ = rx.await;
            },
            grace,
        ));
        (addr, tx, handle)
    }

    async fn request(addr: SocketAddr) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        let _ = stream.read_to_string(&mut response).await;
        response
    }

    #[tokio::test]
    async fn test_idle_server_stops_on_signal() {
        let (_, stop, handle) = start(Duration::ZERO, Duration::from_secs(5)).await;

        stop.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(2), handle).await.unwrap();
        assert!(result.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_in_flight_request_completes_within_grace() {
        let (addr, stop, handle) = start(Duration::from_millis(200), Duration::from_secs(5)).await;

        let client = tokio::spawn(request(addr));
        tokio::time::sleep(Duration::from_millis(50)).await;
        stop.send(()).unwrap();

        let response = client.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("done"));
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_grace_period_bounds_shutdown() {
        let (addr, stop, handle) = start(Duration::from_secs(30), Duration::from_millis(200)).await;

        let _client = tokio::spawn(request(addr));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let started = Instant::now();
        stop.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap();
        assert!(result.unwrap().is_ok());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
