//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (OPTIONS answered with 204; CORS headers on every response)
//!     → routing lookup
//!     → auth.rs (X-Proxy-Key check for protected routes)
//!     → Pass to target
//! ```
//!
//! # Design Decisions
//! - Fail closed: a configured secret must match exactly
//! - Rejected requests never reach the upstream

pub mod auth;
pub mod cors;

pub use auth::{ProxyKey, X_PROXY_KEY};
