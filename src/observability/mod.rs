//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!     → tower-http TraceLayer (per-request spans carrying x-request-id)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Secrets never appear in log fields; `Secret` redacts its Debug output
//! - Metrics exporter is off unless configured

pub mod logging;
pub mod metrics;
