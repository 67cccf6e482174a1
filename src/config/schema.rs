//! Configuration schema definitions.
//!
//! Every section derives `Deserialize` with `#[serde(default)]` so a config
//! file may name only the fields it changes. Environment overrides are applied
//! on top by the loader.

use std::fmt;
use std::net::SocketAddr;

use serde::Deserialize;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream AI API settings.
    pub upstream: UpstreamConfig,

    /// Inbound shared-secret settings.
    pub auth: AuthConfig,

    /// Transactional email settings for part requests.
    pub mail: MailConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A credential that must never reach logs.
///
/// `Debug` is redacted; the raw value is only reachable through [`Secret::expose`].
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a value, treating the empty string as "not configured".
    pub fn non_empty(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl ListenerConfig {
    /// Replace the port of the bind address, keeping the host.
    ///
    /// An unparseable bind address is left as written so validation rejects it.
    pub fn set_port(&mut self, port: u16) {
        let Ok(mut addr) = self.bind_address.parse::<SocketAddr>() else {
            return;
        };
        addr.set_port(port);
        self.bind_address = addr.to_string();
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Upstream AI API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL requests are forwarded to.
    pub base_url: String,

    /// Bearer credential injected into every forwarded request.
    pub api_key: Option<Secret>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
        }
    }
}

/// Inbound authorization configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Expected `X-Proxy-Key` value. `None` disables the check.
    pub proxy_key: Option<Secret>,
}

/// Email provider configuration used by the part-request handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Email provider base URL.
    pub base_url: String,

    /// Email provider API key.
    pub api_key: Option<Secret>,

    /// Recipient of part-request notifications.
    pub to_address: Option<String>,

    /// Sender address for part-request notifications.
    pub from_address: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.resend.com".to_string(),
            api_key: None,
            to_address: None,
            from_address: None,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
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
