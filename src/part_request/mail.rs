//! Transactional email delivery (Resend HTTP API).

use serde::Serialize;
use thiserror::Error;

use crate::config::loader::{REQUEST_FROM_EMAIL, REQUEST_TO_EMAIL, RESEND_API_KEY};
use crate::config::{MailConfig, Secret};
use crate::part_request::payload::PartRequest;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("{0} is not set.")]
    NotConfigured(&'static str),

    #[error("Resend error ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: String,
    text: String,
}

/// Sends part-request notifications.
///
/// Settings are checked per send so a relay without mail configured still
/// serves the AI routes.
#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<Secret>,
    to_address: Option<String>,
    from_address: Option<String>,
}

impl Mailer {
    pub fn new(http: reqwest::Client, config: &MailConfig) -> Self {
        Self {
            http,
            endpoint: format!("{}/emails", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            to_address: config.to_address.clone(),
            from_address: config.from_address.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.to_address.is_some() && self.from_address.is_some()
    }

    pub async fn send(&self, request: &PartRequest) -> Result<(), MailError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(MailError::NotConfigured(RESEND_API_KEY))?;
        let to = self
            .to_address
            .as_deref()
            .ok_or(MailError::NotConfigured(REQUEST_TO_EMAIL))?;
        let from = self
            .from_address
            .as_deref()
            .ok_or(MailError::NotConfigured(REQUEST_FROM_EMAIL))?;

        let email = OutgoingEmail {
            from,
            to: [to],
            reply_to: &request.email,
            subject: request.subject(),
            text: request.email_text(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose())
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(part_number = %request.part_number, "Part request emailed");
        Ok(())
    }
}
