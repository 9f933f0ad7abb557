//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration (including the served file) before binding
//! - Bind the listener and start serving immediately
//! - Discover host addresses and build the operator report
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is serving before the report is printed, so a device can
//!   connect as soon as the command appears
//! - Draining after a shutdown signal is bounded by `shutdown_grace`

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::{AbortHandle, JoinHandle};

use crate::config::{validation::validate_config, ConfigError, ServerConfig};
use crate::discovery::ConnectivityReport;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{self, BindError};

/// Fatal startup or serving error.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl StartupError {
    /// Log the error with any operator hint it carries.
    pub fn log(&self) {
        match self {
            StartupError::Bind(e) => e.log(),
            other => tracing::error!(error = %other, "Startup failed"),
        }
    }
}

/// A server that has bound its listener and is accepting connections.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    report: ConnectivityReport,
    handle: JoinHandle<Result<(), std::io::Error>>,
    /// Subscribed at start, so a trigger before `wait` is not missed.
    stop: broadcast::Receiver<()>,
    grace: Duration,
}

impl RunningServer {
    /// Address the listener actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn report(&self) -> &ConnectivityReport {
        &self.report
    }

    /// Handle that stops the serving task without draining.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    /// Wait for the serving task to finish.
    ///
    /// Once shutdown is triggered, in-flight downloads get the configured
    /// grace period; after that the serving task is aborted. Connection tasks
    /// still stuck on a stalled peer end with the runtime.
    pub async fn wait(self) -> Result<(), StartupError> {
        let RunningServer {
            mut handle,
            mut stop,
            grace,
            ..
        } = self;

        tokio::select! {
            res = &mut handle => {
                res??;
                return Ok(());
            }
            _ = stop.recv() => {}
        }

        match tokio::time::timeout(grace, &mut handle).await {
            Ok(res) => res??,
            Err(_) => {
                tracing::warn!(
                    grace_secs = grace.as_secs_f64(),
                    "Downloads still in flight after grace period, stopping anyway"
                );
                handle.abort();
            }
        }
        Ok(())
    }
}

/// Validate, bind and start serving. Returns once the listener is accepting.
pub async fn start(
    config: Arc<ServerConfig>,
    shutdown: &Shutdown,
) -> Result<RunningServer, StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let listener = net::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    let stop = shutdown.subscribe();
    let server = HttpServer::new(Arc::clone(&config));
    let handle = tokio::spawn(server.run(listener, shutdown.wait()));

    let report = ConnectivityReport::discover(&config);

    Ok(RunningServer {
        local_addr,
        report,
        handle,
        stop,
        grace: config.shutdown_grace,
    })
}

/// Full process lifecycle: start, print the report, serve until a signal.
///
/// The first signal drains downloads for the grace period; a second signal
/// exits at once.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let config = Arc::new(config);
    let shutdown = Shutdown::new();

    let server = start(config, &shutdown).await?;
    println!("{}", server.report());

    let abort = server.abort_handle();
    tokio::select! {
        res = server.wait() => res?,
        _ = signals::forward_signals(shutdown.clone()) => abort.abort(),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
