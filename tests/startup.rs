//! Startup failure and lifecycle tests.

use std::sync::Arc;
use std::time::Duration;

use sysupgrade_server::config::{ConfigError, ValidationError};
use sysupgrade_server::lifecycle::{self, StartupError};
use sysupgrade_server::net::BindError;
use sysupgrade_server::{ServerConfig, Shutdown};

mod common;

#[tokio::test]
async fn port_in_use_fails_without_listener() {
    let fw = common::firmware_file(b"image");
    let holder = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let mut config = ServerConfig::new(fw.path());
    config.bind_host = "127.0.0.1".parse().unwrap();
    config.port = holder.local_addr().unwrap().port();

    let err = lifecycle::start(Arc::new(config), &Shutdown::new())
        .await
        .unwrap_err();

    match err {
        StartupError::Bind(e @ BindError::AddrInUse { .. }) => assert!(e.hint().is_some()),
        other => panic!("expected AddrInUse, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_file_fails_before_binding() {
    let mut config = ServerConfig::new("/nonexistent/openwrt-sysupgrade.bin");
    config.bind_host = "127.0.0.1".parse().unwrap();
    config.port = common::free_port();
    let port = config.port;

    let err = lifecycle::start(Arc::new(config), &Shutdown::new())
        .await
        .unwrap_err();

    match err {
        StartupError::Config(ConfigError::Validation(errors)) => {
            assert!(matches!(errors[..], [ValidationError::FileNotFound(_)]));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Nothing was left listening on the port.
    assert!(tokio::net::TcpListener::bind(("127.0.0.1", port)).await.is_ok());
}

#[tokio::test]
async fn report_carries_configured_port_and_device() {
    let fw = common::firmware_file(b"image");
    let mut config = common::local_config(fw.path());
    config.device_name = "bench-router".to_string();
    let port = config.port;

    let (server, shutdown) = common::start_server(config).await;

    let report = server.report();
    assert_eq!(report.port, port);
    let text = report.to_string();
    assert!(text.contains(&format!("  Port: [{port}]")));
    assert!(text.contains(&format!(":{port}/sysupgrade.bin")));
    assert!(text.contains("To factory reset the bench-router device"));

    shutdown.trigger();
}

#[tokio::test]
async fn shutdown_stops_the_server() {
    let fw = common::firmware_file(b"image");
    let (server, shutdown) = common::start_server(common::local_config(fw.path())).await;
    let addr = server.local_addr();

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server.wait())
        .await
        .expect("server should stop after shutdown")
        .unwrap();

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
