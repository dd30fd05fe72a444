use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use message_store::{build_store, init_tracing, metrics_router, router, Backend, Config, HttpState, Telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    info!(
        mongo_url_var = ?config.url_sources.mongo_url,
        db_port_var = ?config.url_sources.db_port,
        compose_db_host_var = ?config.url_sources.compose_db_host,
        "environment"
    );
    info!(backend = ?config.backend, url = %config.mongo_url, database = %config.database, "resolved persistence backend");

    let store = build_store(&config).await.context("building message store")?;
    match store.ping().await {
        Ok(()) if config.backend == Backend::Mongo => info!("MongoDB connection confirmed"),
        Ok(()) => {}
        Err(e) => warn!(error = %e, "backend not reachable at startup; requests will fail until it is"),
    }

    let telemetry = Telemetry::new();
    let state = Arc::new(HttpState::new(store, telemetry));

    if let Some(addr) = config.metrics_addr {
        let listener = TcpListener::bind(addr).await.with_context(|| format!("binding metrics listener on {addr}"))?;
        info!(%addr, "serving metrics");
        let app = metrics_router(state.clone());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!(error = %e, "metrics listener stopped");
            }
        });
    }

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "message store listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
