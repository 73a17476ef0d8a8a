//! OS signal handling.
//!
//! SIGINT (Ctrl+C), SIGTERM and the internal [`Shutdown`](super::Shutdown)
//! trigger all resolve the same future.

use tokio::sync::broadcast;

/// Completes when the process should shut down.
pub async fn shutdown_signal(mut internal: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
        _ = internal.recv() => tracing::info!("Shutdown requested"),
    }
}
