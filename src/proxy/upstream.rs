//! Upstream AI API client.
//!
//! Injects the bearer credential and relays bytes both ways without parsing
//! them.

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::loader::OPENAI_API_KEY;
use crate::config::{Secret, UpstreamConfig};
use crate::error::RelayError;
use crate::observability::metrics;

/// What came back from the upstream, kept verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}

/// Forwards requests to the configured upstream base URL.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<Secret>,
}

impl UpstreamClient {
    pub fn new(http: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one request upstream. `body` of `None` sends no body at all.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<UpstreamResponse, RelayError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(RelayError::MissingCredential(OPENAI_API_KEY))?;

        let start = Instant::now();
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(api_key.expose());
        if let Some(body) = body {
            request = request.body(body);
        }

        let result = async {
            let response = request.send().await?;
            let status = response.status();
            let content_type = response.headers().get(CONTENT_TYPE).cloned();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse {
                status,
                content_type,
                body,
            })
        }
        .await;

        match result {
            Ok(upstream) => {
                tracing::debug!(
                    method = %method,
                    path,
                    status = %upstream.status,
                    bytes = upstream.body.len(),
                    "Upstream responded"
                );
                metrics::record_upstream(path, upstream.status.as_str(), start);
                Ok(upstream)
            }
            Err(e) => {
                tracing::error!(method = %method, path, error = %e, "Upstream request failed");
                metrics::record_upstream(path, "error", start);
                Err(RelayError::Upstream(e))
            }
        }
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .finish()
    }
}
