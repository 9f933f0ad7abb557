//! Operator-facing connectivity report.
//!
//! Printed once at startup: where the server can be reached and the commands
//! to paste into the device shell.

use std::fmt;
use std::net::Ipv4Addr;

use crate::config::ServerConfig;
use crate::discovery::interfaces;

/// Path the device fetches. The server ignores it, any path works.
pub const UPGRADE_PATH: &str = "/sysupgrade.bin";

/// Stand-in for the server address when no external IPv4 address exists.
pub const ADDRESS_PLACEHOLDER: &str = "<server-ip>";

pub const FACTORY_RESET_COMMAND: &str = "mtd -r erase rootfs_data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub addresses: Vec<Ipv4Addr>,
    pub port: u16,
    pub device_name: String,
}

impl ConnectivityReport {
    pub fn new(addresses: Vec<Ipv4Addr>, config: &ServerConfig) -> Self {
        Self {
            addresses,
            port: config.port,
            device_name: config.device_name.clone(),
        }
    }

    /// Enumerate host interfaces and build the report.
    ///
    /// Enumeration failure is not fatal: the report is built with no addresses.
    pub fn discover(config: &ServerConfig) -> Self {
        let addresses = match interfaces::enumerate() {
            Ok(all) => interfaces::external_ipv4(&all),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to enumerate network interfaces");
                Vec::new()
            }
        };

        if addresses.is_empty() {
            tracing::warn!("No non-internal IPv4 address found");
        }

        Self::new(addresses, config)
    }

    pub fn first_address(&self) -> Option<Ipv4Addr> {
        self.addresses.first().copied()
    }

    /// "Address" or "Addresses".
    pub fn address_label(&self) -> &'static str {
        if self.addresses.len() > 1 {
            "Addresses"
        } else {
            "Address"
        }
    }

    /// URL the device downloads from. `:port` is omitted for port 80.
    pub fn upgrade_url(&self) -> String {
        let host = self
            .first_address()
            .map(|a| a.to_string())
            .unwrap_or_else(|| ADDRESS_PLACEHOLDER.to_string());

        if self.port == 80 {
            format!("http://{host}{UPGRADE_PATH}")
        } else {
            format!("http://{host}:{}{UPGRADE_PATH}", self.port)
        }
    }

    pub fn upgrade_command(&self) -> String {
        format!(
            "echo 3 > /proc/sys/vm/drop_caches && /sbin/sysupgrade -v {}",
            self.upgrade_url()
        )
    }
}

impl fmt::Display for ConnectivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .addresses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        writeln!(f)?;
        writeln!(f, "Waiting for connection...")?;
        writeln!(f, "  {}: [{}]", self.address_label(), joined)?;
        writeln!(f, "  Port: [{}]", self.port)?;
        writeln!(f)?;

        writeln!(
            f,
            "To upgrade the {} device, run the following command:",
            self.device_name
        )?;
        if self.first_address().is_none() {
            writeln!(
                f,
                "  (no network address found, replace {ADDRESS_PLACEHOLDER} with this host's address)"
            )?;
        }
        writeln!(f, "  {}", self.upgrade_command())?;
        writeln!(f)?;

        writeln!(
            f,
            "To factory reset the {} device, run the following command:",
            self.device_name
        )?;
        writeln!(f, "  {FACTORY_RESET_COMMAND}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(addresses: &[&str], port: u16) -> ConnectivityReport {
        ConnectivityReport {
            addresses: addresses.iter().map(|a| a.parse().unwrap()).collect(),
            port,
            device_name: "a140808".to_string(),
        }
    }

    #[test]
    fn default_port_omitted_from_url() {
        assert_eq!(
            report(&["192.168.1.5"], 80).upgrade_url(),
            "http://192.168.1.5/sysupgrade.bin"
        );
    }

    #[test]
    fn other_port_in_url() {
        assert_eq!(
            report(&["192.168.1.5"], 8080).upgrade_url(),
            "http://192.168.1.5:8080/sysupgrade.bin"
        );
    }

    #[test]
    fn first_address_is_used() {
        let r = report(&["10.0.0.7", "192.168.1.5"], 80);
        assert_eq!(
            r.upgrade_command(),
            "echo 3 > /proc/sys/vm/drop_caches && /sbin/sysupgrade -v http://10.0.0.7/sysupgrade.bin"
        );
    }

    #[test]
    fn label_pluralises_above_one() {
        assert_eq!(report(&[], 80).address_label(), "Address");
        assert_eq!(report(&["10.0.0.7"], 80).address_label(), "Address");
        assert_eq!(report(&["10.0.0.7", "10.0.0.8"], 80).address_label(), "Addresses");
    }

    #[test]
    fn no_address_uses_placeholder() {
        let r = report(&[], 8080);
        assert!(r.first_address().is_none());
        assert_eq!(r.upgrade_url(), "http://<server-ip>:8080/sysupgrade.bin");

        let text = r.to_string();
        assert!(text.contains("  Address: []"));
        assert!(text.contains("replace <server-ip>"));
    }

    #[test]
    fn full_rendering() {
        let text = report(&["192.168.1.5", "10.0.0.2"], 80).to_string();
        let expected = "
Waiting for connection...
  Addresses: [192.168.1.5 10.0.0.2]
  Port: [80]

To upgrade the a140808 device, run the following command:
  echo 3 > /proc/sys/vm/drop_caches && /sbin/sysupgrade -v http://192.168.1.5/sysupgrade.bin

To factory reset the a140808 device, run the following command:
  mtd -r erase rootfs_data
";
        assert_eq!(text, expected);
    }
}
