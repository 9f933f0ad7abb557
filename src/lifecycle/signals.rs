//! OS signal handling.
//!
//! SIGINT (Ctrl+C) and, on Unix, SIGTERM both count as a termination signal.
//! The first one starts graceful shutdown; a second one while downloads are
//! still draining forces the process out.

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` on the first signal, then return on the second.
pub async fn forward_signals(shutdown: Shutdown) {
    wait_for_signal().await;
    tracing::info!("Shutdown signal received, draining in-flight downloads");
    shutdown.trigger();

    wait_for_signal().await;
    tracing::warn!("Second shutdown signal received, exiting without draining");
}

/// Resolve on the next termination signal.
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler");
            ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = ctrl_c() => {}
        _ = term.recv() => {}
    }
}

/// Resolve on the next termination signal.
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
