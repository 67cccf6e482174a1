//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (x-request-id, body buffering)
//!     → routing lookup → auth → target
//!     → response (passthrough or JSON envelope) + CORS headers
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRelayRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
