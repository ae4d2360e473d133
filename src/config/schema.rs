//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the license relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Illinois CKAN datastore upstream.
    pub illinois: IllinoisConfig,

    /// Colorado Socrata upstream.
    pub colorado: ColoradoConfig,

    /// California DCA license search upstream.
    pub california: CaliforniaConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_body_bytes: 15 * 1024 * 1024,
        }
    }
}

impl ListenerConfig {
    /// Replace the port of the bind address, keeping its host.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.bind_address = format!("{}:{}", host, port);
    }
}

/// Timeout configuration for inbound and outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for an inbound request, in seconds.
    pub request_secs: u64,

    /// Total time allowed for an upstream call, in seconds.
    pub upstream_secs: u64,

    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 20,
            connect_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IllinoisConfig {
    /// CKAN `datastore_search` action URL.
    pub base_url: String,

    /// Dataset resource holding the professional license roster.
    pub resource_id: String,
}

impl Default for IllinoisConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.illinois.gov/api/3/action/datastore_search".to_string(),
            resource_id: "fecd51fd-830f-4245-b4e0-9d952992f855".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColoradoConfig {
    /// Socrata resource URL for the professional license dataset.
    pub base_url: String,

    /// Socrata application token, sent as `X-App-Token` (env: `CO_APP_TOKEN`).
    pub app_token: Option<String>,
}

impl Default for ColoradoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.colorado.gov/resource/7s5z-vewr.json".to_string(),
            app_token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaliforniaConfig {
    /// DCA license search endpoint.
    pub base_url: String,

    /// Basic-auth credential (env: `CALI_API_AUTH`).
    pub auth: Option<String>,

    /// Board client codes the search is scoped to.
    pub client_codes: Vec<String>,
}

impl Default for CaliforniaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://iservices.dca.ca.gov/api/search/v1/licenseSearchService/getAllLicenses"
                .to_string(),
            auth: None,
            client_codes: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
