//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{RelayConfig, Secret};
use crate::config::validation::{validate_config, ValidationError};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PROXY_KEY: &str = "PROXY_KEY";
pub const RESEND_API_KEY: &str = "RESEND_API_KEY";
pub const REQUEST_TO_EMAIL: &str = "REQUEST_TO_EMAIL";
pub const REQUEST_FROM_EMAIL: &str = "REQUEST_FROM_EMAIL";
pub const PORT: &str = "PORT";
pub const UPSTREAM_BASE_URL: &str = "RELAY_UPSTREAM_BASE_URL";
pub const MAIL_BASE_URL: &str = "RELAY_MAIL_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file into a configuration without validating it.
pub fn load_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so tests can supply a map. Empty values
/// are treated as unset.
pub fn apply_env<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(key) = get(OPENAI_API_KEY) {
        config.upstream.api_key = Secret::non_empty(key);
    }
    if let Some(key) = get(PROXY_KEY) {
        config.auth.proxy_key = Secret::non_empty(key);
    }
    if let Some(key) = get(RESEND_API_KEY) {
        config.mail.api_key = Secret::non_empty(key);
    }
    if let Some(to) = get(REQUEST_TO_EMAIL) {
        config.mail.to_address = Some(to);
    }
    if let Some(from) = get(REQUEST_FROM_EMAIL) {
        config.mail.from_address = Some(from);
    }
    if let Some(url) = get(UPSTREAM_BASE_URL) {
        config.upstream.base_url = url;
    }
    if let Some(url) = get(MAIL_BASE_URL) {
        config.mail.base_url = url;
    }
    if let Some(port) = get(PORT) {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEnv { name: PORT, value: port })?;
        config.listener.set_port(port);
    }

    Ok(())
}

/// Drop empty strings that a config file may carry for optional settings.
fn normalize(config: &mut RelayConfig) {
    let clear = |secret: &mut Option<Secret>| {
        if secret.as_ref().is_some_and(|s| s.expose().is_empty()) {
            *secret = None;
        }
    };
    clear(&mut config.upstream.api_key);
    clear(&mut config.auth.proxy_key);
    clear(&mut config.mail.api_key);

    for address in [&mut config.mail.to_address, &mut config.mail.from_address] {
        if address.as_deref().is_some_and(|a| a.trim().is_empty()) {
            *address = None;
        }
    }
}

/// Build the process configuration: optional file, then environment, then validation.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env(&mut config, lookup)?;
    normalize(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
