//! Address discovery subsystem.
//!
//! # Data Flow
//! ```text
//! OS interfaces (get_if_addrs)
//!     → interfaces.rs (NetworkAddress, filter to non-internal IPv4)
//!     → report.rs (ConnectivityReport: addresses, port, device commands)
//!     → stdout, once at startup
//! ```

pub mod interfaces;
pub mod report;

pub use interfaces::{AddressFamily, NetworkAddress};
pub use report::ConnectivityReport;
