//! Command-line interface.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, ConfigError, ConfigOverrides, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "sysupgrade-server")]
#[command(
    about = "Serve a firmware image over HTTP and print the device upgrade command",
    long_about = None
)]
pub struct Cli {
    /// File to serve to every client
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// TCP port to listen on [default: 80]
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Interface address to bind [default: 0.0.0.0]
    #[arg(long, value_name = "IP")]
    pub bind: Option<IpAddr>,

    /// Device name shown in the printed instructions [default: a140808]
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Log level used when RUST_LOG is not set [default: info]
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Seconds in-flight downloads may drain after Ctrl+C/SIGTERM [default: 10]
    #[arg(long, value_name = "SECS")]
    pub shutdown_grace: Option<u64>,

    /// TOML config file; command-line flags take precedence
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_host: self.bind,
            port: self.port,
            file: self.file.clone(),
            device_name: self.device.clone(),
            log_level: self.log_level.clone(),
            shutdown_grace_secs: self.shutdown_grace,
        }
    }

    /// Resolve the server configuration. Validation happens at startup.
    pub fn load(&self) -> Result<ServerConfig, ConfigError> {
        load_config(self.config.as_deref(), self.overrides())
    }
}
