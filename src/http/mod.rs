//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer logged by net::connection)
//!     → server.rs (Axum setup, fallback handler, trace layer)
//!     → response.rs (open + stat file, attachment headers, chunked body)
//!     → Send to client
//! ```
//!
//! Method, path and request headers are never inspected: every request gets
//! the same file.

pub mod response;
pub mod server;

pub use response::ServedFile;
pub use server::HttpServer;
