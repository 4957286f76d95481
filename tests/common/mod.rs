//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use onion_router::{App, HttpServer, ServerConfig, Shutdown};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port.
///
/// The listener is bound before this returns, so requests can be sent
/// immediately. Dropping the returned [`Shutdown`] without triggering leaves
/// the server running until the test runtime ends.
pub async fn start_server(app: App) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, app);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that never pools or proxies, so each test sees a fresh connection.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
