//! miniPCB API relay library.
//!
//! Forwards a fixed set of `/api/*` routes to an upstream AI API with an
//! injected bearer credential, guards them with an optional shared secret,
//! and emails part-request form submissions.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod part_request;
pub mod proxy;
pub mod routing;
pub mod security;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
