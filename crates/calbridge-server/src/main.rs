//! calbridge server binary: serves the calendar listing API over HTTP.

use std::sync::Arc;

use tracing::{info, warn};

use calbridge_core::tracing::{TracingConfig, init_tracing};
use calbridge_providers::GoogleEventSource;
use calbridge_server::routes::{AppState, router};
use calbridge_server::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(TracingConfig::server())?;

    let config = ServerConfig::from_env();
    info!(addr = %config.bind_addr, "starting calbridge server");

    let source = Arc::new(GoogleEventSource::new(config.provider_timeout));
    let app = router(AppState::new(source));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
