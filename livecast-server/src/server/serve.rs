use crate::{ServerConfig, SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// WebSocket endpoint at `config.route`, sharing `service` as state.
pub fn router(service: SignalingService, config: &ServerConfig) -> Router {
    let app = Router::new().route(&config.route, get(ws_handler));

    let app = if config.allow_cors {
        // Browser clients are usually served from another origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    };

    app.with_state(service)
}

/// Runs the relay until ctrl-c.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let service = SignalingService::new(config.ice_servers.clone());
    let app = router(service, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(
        "Signaling server listening on ws://{}{}",
        config.bind_addr, config.route
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Signaling server stopped unexpectedly")?;

    info!("Signaling server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
