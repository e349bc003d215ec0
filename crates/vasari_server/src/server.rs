//! Listener setup.

use axum::Router;
use tracing::info;
use vasari_error::{ServerError, ServerErrorKind};

/// Serves `router` on `bind` until Ctrl-C.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Bind`] if the address cannot be bound and
/// [`ServerErrorKind::Serve`] if the server stops with an error.
pub async fn serve(bind: &str, router: Router) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(bind).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: bind.to_string(),
            message: e.to_string(),
        })
    })?;
    info!(address = %bind, "Trigger server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
