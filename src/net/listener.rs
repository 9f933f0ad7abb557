//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Classify bind failures so the operator gets an actionable hint
//!
//! Binding is fatal on failure: no retry, no fallback port.

use std::io::ErrorKind;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener binding.
#[derive(Debug, Error)]
pub enum BindError {
    /// Privileged port without sufficient privilege.
    #[error("permission denied binding {addr}: {source}")]
    PermissionDenied {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Another process already holds the port.
    #[error("address {addr} already in use: {source}")]
    AddrInUse {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Anything else the OS reported.
    #[error("failed to bind {addr}: {source}")]
    Other {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl BindError {
    /// Classify an OS bind error.
    pub fn from_io(addr: SocketAddr, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::PermissionDenied => BindError::PermissionDenied { addr, source },
            ErrorKind::AddrInUse => BindError::AddrInUse { addr, source },
            _ => BindError::Other { addr, source },
        }
    }

    /// Operator-facing hint, if there is something actionable to say.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            BindError::PermissionDenied { .. } => Some("cannot open port, please run as root"),
            BindError::AddrInUse { .. } => {
                Some("another process is using this port, stop it or pick another with --port")
            }
            BindError::Other { .. } => None,
        }
    }

    /// Log this error the way startup reports it.
    pub fn log(&self) {
        match self.hint() {
            Some(hint) => tracing::error!(error = %self, hint, "Listener bind failed"),
            None => tracing::error!(error = %self, "Listener bind failed"),
        }
    }
}

/// Bind a TCP listener on `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, BindError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| BindError::from_io(addr, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| BindError::from_io(addr, e))?;

    tracing::info!(address = %local_addr, "Listener bound");

    Ok(listener)
}
