//! Upstream forwarding.
//!
//! # Data Flow
//! ```text
//! Matched upstream route
//!     → upstream.rs (credential check, bearer injection)
//!     → reqwest call to {base_url}{path}
//!     → UpstreamResponse (status, content-type, raw bytes)
//!     → written back to the caller unchanged
//! ```
//!
//! # Design Decisions
//! - Bodies are opaque bytes in both directions
//! - One attempt per request; no retries, no added timeouts
//! - Upstream non-2xx statuses are the caller's answer, not relay errors

pub mod upstream;

pub use upstream::{UpstreamClient, UpstreamResponse};
