//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (OPENAI_API_KEY, PROXY_KEY, PORT, ...)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed to HttpServer once at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once; handlers never consult the environment
//! - All fields have defaults to allow an env-only deployment
//! - A missing upstream credential is reported per request, not at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, LimitsConfig, ListenerConfig, MailConfig, ObservabilityConfig, RelayConfig,
    Secret, UpstreamConfig,
};
