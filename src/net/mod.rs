//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig::bind_address()
//!     → listener.rs (bind, classify failures)
//!     → axum::serve accept loop
//!     → connection.rs (ClientAddr connect info, connect event logged)
//!     → Hand off to HTTP layer
//! ```

pub mod connection;
pub mod listener;

pub use connection::ClientAddr;
pub use listener::{bind, BindError};
