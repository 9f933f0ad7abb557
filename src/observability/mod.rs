//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (connect, stream, bind, shutdown)
//!     → logging.rs (EnvFilter + fmt layer to the console)
//! ```

pub mod logging;

pub use logging::init_logging;
