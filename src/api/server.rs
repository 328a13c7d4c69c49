//! HTTP server implementation

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowMethods;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing::warn;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::errors::HoopRagError;
use crate::rag::RagService;
use crate::Result;

/// CORS for exactly one origin, with credentials.
///
/// Other origins get no `Access-Control-Allow-Origin` header at all. Methods and
/// headers mirror the preflight request, since wildcards are not allowed
/// together with credentials.
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin.trim_end_matches('/'))
        .map_err(|e| HoopRagError::ConfigError(format!("server.cors_origin: {e}")))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Full application router: `/api/*` plus tracing, compression and CORS.
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router> {
    Ok(Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(cors_origin)?))
}

/// Start the API server and run until Ctrl-C.
pub async fn serve_api(config: &AppConfig, host: &str, port: u16) -> Result<()> {
    info!("Starting hooprag API server...");

    let rag = Arc::new(RagService::open(config).await?);
    let state = AppState::new(
        rag.clone(),
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let app = build_router(state, &config.server.cors_origin)?;

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("CORS origin: {}", config.server.cors_origin);
    info!("Available endpoints:");
    info!("  GET  /api/health - Health check");
    info!("  POST /api/chat   - Ask a question");

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    rag.close().await;
    info!("API server stopped");
    Ok(())
}

/// Cancel `token` once `signal` fires.
///
/// A signal listener that fails to install leaves the token alone; the server
/// then runs until the process is killed.
async fn cancel_on_signal<F>(signal: F, token: CancellationToken)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("Shutdown signal received");
            token.cancel();
        }
        Err(e) => warn!("Failed to listen for Ctrl-C, graceful shutdown disabled: {}", e),
    }
}
