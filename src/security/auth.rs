//! Shared-secret check for protected routes.

use axum::http::HeaderMap;

use crate::config::Secret;
use crate::error::RelayError;

pub const X_PROXY_KEY: &str = "x-proxy-key";

/// The configured `X-Proxy-Key` expectation.
#[derive(Debug, Clone, Default)]
pub struct ProxyKey {
    expected: Option<Secret>,
}

impl ProxyKey {
    pub fn new(expected: Option<Secret>) -> Self {
        Self { expected }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Exact byte comparison against the configured secret.
    /// Always passes when no secret is configured.
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), RelayError> {
        let Some(expected) = &self.expected else {
            return Ok(());
        };

        let provided = headers.get(X_PROXY_KEY).map(|v| v.as_bytes());
        if provided == Some(expected.expose().as_bytes()) {
            Ok(())
        } else {
            Err(RelayError::Unauthorized)
        }
    }
}
