//! Permissive CORS.
//!
//! Every response carries a wildcard origin. The shared secret, not the
//! browser origin, is what gates protected routes.

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, X-Proxy-Key";

/// The three response-header layers, outermost first.
pub fn header_layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    let layer = |name: HeaderName, value: &'static str| {
        SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
    };
    [
        layer(ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        layer(ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        layer(ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

/// Answer every `OPTIONS` request with `204` before routing.
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::trace!(path = %request.uri().path(), "Preflight");
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}
