//! Shared utilities for integration testing.

use std::net::SocketAddr;

use claude_relay::config::{ApiKey, RelayConfig};
use claude_relay::{HttpServer, Shutdown};
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "sk-ant-test-key";
pub const ALLOWED_ORIGIN: &str = "https://mtgscanner.com";

/// Config pointing at `upstream_url`, with an optional credential.
pub fn test_config(upstream_url: &str, api_key: Option<&str>) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream.url = upstream_url.to_string();
    config.api_key = api_key.and_then(ApiKey::new);
    config
}

/// Start the relay on an ephemeral port. Call `trigger` on the returned
/// handle to stop it.
#[allow(dead_code)]
pub async fn spawn_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// URL of a local port with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_upstream_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/messages", addr)
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
