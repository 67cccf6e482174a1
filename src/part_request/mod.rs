//! Part-request form handler.
//!
//! # Data Flow
//! ```text
//! POST /api/part-request (after X-Proxy-Key check)
//!     → payload.rs (clean fields, validate)        → 400 {"ok":false,"error":..}
//!     → mail.rs (compose, POST to email provider)  → 500 {"ok":false,..,"detail":..}
//!     → 200 {"ok":true}
//! ```

pub mod mail;
pub mod payload;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::observability::metrics;

pub use mail::{MailError, Mailer};
pub use payload::PartRequest;

#[derive(Debug, Error)]
pub enum PartRequestError {
    #[error("{0}")]
    Invalid(&'static str),

    #[error("Method not allowed.")]
    MethodNotAllowed,

    #[error("Failed to send part request.")]
    Delivery(#[from] MailError),
}

impl IntoResponse for PartRequestError {
    fn into_response(self) -> Response {
        match &self {
            Self::Invalid(reason) => {
                tracing::debug!(reason, "Part request rejected");
                metrics::record_part_request("invalid");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "ok": false, "error": reason })),
                )
                    .into_response()
            }
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "ok": false, "error": self.to_string() })),
            )
                .into_response(),
            Self::Delivery(e) => {
                tracing::error!(error = %e, "Part request delivery failed");
                metrics::record_part_request("failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "ok": false,
                        "error": self.to_string(),
                        "detail": e.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Clean, validate and deliver one submission.
pub async fn submit(
    mailer: &Mailer,
    body: &[u8],
) -> Result<Json<serde_json::Value>, PartRequestError> {
    let request = PartRequest::from_body(body);
    request.validate().map_err(PartRequestError::Invalid)?;

    mailer.send(&request).await?;

    metrics::record_part_request("sent");
    Ok(Json(json!({ "ok": true })))
}
