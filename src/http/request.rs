//! Request identification and body buffering.

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_LENGTH;
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::RelayError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 `x-request-id` for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRelayRequestId;

impl MakeRequestId for MakeRelayRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID as seen by handlers, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Buffer the inbound body. An empty body yields `None` so nothing is forwarded.
///
/// A declared `Content-Length` over the limit is rejected before reading.
pub async fn read_body(request: Request<Body>, limit: usize) -> Result<Option<Bytes>, RelayError> {
    let declared = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(RelayError::PayloadTooLarge { limit });
    }

    let bytes = axum::body::to_bytes(request.into_body(), limit)
        .await
        .map_err(|e| RelayError::ReadBody(e.to_string()))?;

    Ok(if bytes.is_empty() { None } else { Some(bytes) })
}
