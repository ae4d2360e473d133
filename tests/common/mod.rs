//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use license_relay::{HttpServer, RelayConfig, Shutdown};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const IL_PATH: &str = "/api/3/action/datastore_search";
pub const CO_PATH: &str = "/resource/7s5z-vewr.json";
pub const CA_PATH: &str = "/api/search/v1/licenseSearchService/getAllLicenses";

pub const IL_RESOURCE: &str = "fecd51fd-830f-4245-b4e0-9d952992f855";
pub const CO_TOKEN: &str = "test-app-token";
pub const CA_AUTH: &str = "dGVzdDp0ZXN0";

/// Relay configuration with every upstream pointed at `upstream`.
pub fn config_for(upstream: &MockServer) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.illinois.base_url = format!("{}{}", upstream.uri(), IL_PATH);
    config.colorado.base_url = format!("{}{}", upstream.uri(), CO_PATH);
    config.colorado.app_token = Some(CO_TOKEN.into());
    config.california.base_url = format!("{}{}", upstream.uri(), CA_PATH);
    config.california.auth = Some(CA_AUTH.into());
    config.california.client_codes = vec!["800".into(), "6001".into()];
    config
}

/// A relay serving on an ephemeral port, stopped when dropped.
pub struct RunningRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the relay. The listener is bound before returning, so requests can
/// be sent immediately.
pub async fn start_relay(config: RelayConfig) -> RunningRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningRelay { addr, shutdown }
}
