//! Configuration schema definitions.
//!
//! `FileConfig` mirrors the optional TOML file; every field is optional so the
//! file can set only what it needs. `ServerConfig` is the resolved, immutable
//! form handed to the rest of the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 80;

/// Device name printed in the operator instructions.
pub const DEFAULT_DEVICE_NAME: &str = "a140808";

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// How long in-flight downloads may drain after a shutdown signal.
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;

/// Resolved server configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface address to bind (e.g. `0.0.0.0`).
    pub bind_host: IpAddr,

    /// TCP port to bind.
    pub port: u16,

    /// Path of the file served to every client.
    pub file_path: PathBuf,

    /// Device name used in the printed upgrade/reset instructions.
    pub device_name: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Drain deadline for in-flight downloads once shutdown starts.
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    /// Config with defaults for everything but the served file.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            bind_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            file_path: file_path.into(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }

    /// Socket address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// On-disk configuration (TOML).
///
/// ```toml
/// port = 8080
/// file = "bin/openwrt-squashfs-sysupgrade.bin"
/// device_name = "a140808"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub bind_host: Option<IpAddr>,

    pub port: Option<u16>,

    /// Path of the file to serve.
    pub file: Option<PathBuf>,

    pub device_name: Option<String>,

    pub log_level: Option<String>,

    pub shutdown_grace_secs: Option<u64>,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind_host: Option<IpAddr>,
    pub port: Option<u16>,
    pub file: Option<PathBuf>,
    pub device_name: Option<String>,
    pub log_level: Option<String>,
    pub shutdown_grace_secs: Option<u64>,
}

impl FileConfig {
    /// Merge command-line overrides on top of this file config.
    ///
    /// Returns `None` when neither source names a file to serve.
    pub fn merge(self, overrides: ConfigOverrides) -> Option<ServerConfig> {
        let file_path = overrides.file.or(self.file)?;
        let mut config = ServerConfig::new(file_path);

        if let Some(host) = overrides.bind_host.or(self.bind_host) {
            config.bind_host = host;
        }
        if let Some(port) = overrides.port.or(self.port) {
            config.port = port;
        }
        if let Some(name) = overrides.device_name.or(self.device_name) {
            config.device_name = name;
        }
        if let Some(level) = overrides.log_level.or(self.log_level) {
            config.log_level = level;
        }
        if let Some(secs) = overrides.shutdown_grace_secs.or(self.shutdown_grace_secs) {
            config.shutdown_grace = Duration::from_secs(secs);
        }

        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::new("fw.bin");
        assert_eq!(config.port, 80);
        assert_eq!(config.device_name, "a140808");
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:80");
    }

    #[test]
    fn overrides_win_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
            port = 8080
            file = "from-file.bin"
            device_name = "lab"
            shutdown_grace_secs = 3
            "#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            port: Some(9000),
            ..Default::default()
        };

        let config = file.merge(overrides).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.file_path, PathBuf::from("from-file.bin"));
        assert_eq!(config.device_name, "lab");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.shutdown_grace, Duration::from_secs(3));
    }

    #[test]
    fn merge_without_file_is_none() {
        assert!(FileConfig::default().merge(ConfigOverrides::default()).is_none());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<FileConfig>("prot = 80").is_err());
    }
}
