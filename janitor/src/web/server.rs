use crate::config::Config;
use crate::web::{handlers, AppState};
use anyhow::{Context, Result};
use axum::{routing::any, Router};
use std::future::Future;
use tower_http::trace::TraceLayer;

/// Serve until `shutdown` resolves. In-flight requests (including a manual
/// cleanup) are allowed to complete.
pub async fn start_web_server<F>(config: &Config, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::cleanup_endpoint))
        .fallback(handlers::cleanup_endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
