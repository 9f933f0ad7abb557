//! Per-connection peer tracking.
//!
//! `ClientAddr` is axum connect info: it is built once for every accepted TCP
//! connection, which is where the connect event is logged. Handlers extract it
//! with `ConnectInfo<ClientAddr>`.

use std::fmt;
use std::net::SocketAddr;

use axum::extract::connect_info::Connected;
use axum::serve::IncomingStream;
use tokio::net::TcpListener;

/// Remote peer address of a client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientAddr(pub SocketAddr);

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.ip())
    }
}

impl Connected<IncomingStream<'_, TcpListener>> for ClientAddr {
    fn connect_info(stream: IncomingStream<'_, TcpListener>) -> Self {
        let peer = ClientAddr(*stream.remote_addr());
        tracing::info!(peer_addr = %peer, peer_port = peer.0.port(), "Client connected");
        peer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use axum::Router;

    #[test]
    fn display_is_ip_only() {
        let peer = ClientAddr("192.168.1.20:50312".parse().unwrap());
        assert_eq!(peer.to_string(), "192.168.1.20");
    }

    #[tokio::test]
    async fn handler_sees_connecting_peer() {
        let app = Router::new().fallback(|ConnectInfo(peer): ConnectInfo<ClientAddr>| async move {
            format!("{peer} {}", peer.0.port())
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<ClientAddr>())
                .await
                .unwrap();
        });

        let body = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap()
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        let (ip, port) = body.split_once(' ').unwrap();
        assert_eq!(ip, "127.0.0.1");
        assert_ne!(port, "0");
    }
}
