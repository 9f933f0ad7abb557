//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use sysupgrade_server::lifecycle::{self, RunningServer};
use sysupgrade_server::{ServerConfig, Shutdown};
use tempfile::NamedTempFile;

/// A port that was free a moment ago.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Deterministic, non-repeating-looking payload of `len` bytes.
pub fn firmware_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Write `data` into a temp file named like a firmware image.
pub fn firmware_file(data: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("openwrt-")
        .suffix("-sysupgrade.bin")
        .tempfile()
        .unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

/// Config bound to loopback on a fresh port.
pub fn local_config(path: &std::path::Path) -> ServerConfig {
    let mut config = ServerConfig::new(path);
    config.bind_host = "127.0.0.1".parse().unwrap();
    config.port = free_port();
    config
}

/// Start a server for `config`; the returned `Shutdown` stops it.
pub async fn start_server(config: ServerConfig) -> (RunningServer, Shutdown) {
    let shutdown = Shutdown::new();
    let server = lifecycle::start(Arc::new(config), &shutdown)
        .await
        .expect("server should start");
    (server, shutdown)
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
