//! Single-file firmware download server.
//!
//! Serves one file to every HTTP client, whatever the method or path, and
//! prints the host's reachable IPv4 addresses together with the command to
//! paste into the device shell.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client request ──▶ net::listener ──▶ net::connection ──▶ http::server
//!                        (bind, errors)    (peer logged)       (fallback handler)
//!                                                                   │
//!     Client response ◀──────────────── http::response ◀────────────┘
//!                                       (headers + chunked file stream)
//!
//!     discovery::interfaces ──▶ discovery::report ──▶ stdout (once, at startup)
//!
//!     config ──▶ lifecycle::startup ──▶ lifecycle::signals/shutdown
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
