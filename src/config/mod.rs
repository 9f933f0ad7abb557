//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags ──────────────┐
//!                         ├─→ schema.rs (FileConfig::merge, CLI wins)
//! config file (TOML) ─────┘
//!     → ServerConfig (immutable)
//!     → validation.rs at startup, before bind (port range, served file exists)
//!     → shared via Arc with the server and the address report
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Only the served file is mandatory; everything else has a default
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ConfigOverrides, FileConfig, ServerConfig};
pub use validation::ValidationError;
