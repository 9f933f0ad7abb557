//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Respect `RUST_LOG` when set, fall back to the configured level otherwise
//!
//! # Design Decisions
//! - Events carry fields (`peer_addr`, `file`, `error`); colouring is left to
//!   the fmt layer rather than embedded in message strings

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("sysupgrade_server={level},tower_http={level}")
}

/// Install the global subscriber.
///
/// A second call (e.g. from tests) is a no-op.
pub fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_names_crate_and_http_layer() {
        assert_eq!(
            default_filter("debug"),
            "sysupgrade_server=debug,tower_http=debug"
        );
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging("info");
        init_logging("debug");
    }
}
