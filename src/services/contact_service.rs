use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::config::ContactConfig;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name);
        errors.email("email", &self.email);
        errors.require("message", &self.message);
        errors.into_result()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Contact form request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Contact form endpoint answered {0}")]
    Status(StatusCode),
}

/// Forwards contact messages to an external form endpoint as a
/// URL-encoded POST
#[derive(Debug, Clone)]
pub struct ContactRelay {
    client: Client,
    config: ContactConfig,
}

impl ContactRelay {
    pub fn new(config: ContactConfig) -> Result<Self, ContactError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Field ids mapped to the message parts, in form order
    pub fn form_fields<'a>(&'a self, message: &'a ContactMessage) -> [(&'a str, &'a str); 3] {
        [
            (self.config.name_field.as_str(), message.name.as_str()),
            (self.config.email_field.as_str(), message.email.as_str()),
            (self.config.message_field.as_str(), message.message.as_str()),
        ]
    }

    pub async fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
        let response = self
            .client
            .post(&self.config.form_url)
            .form(&self.form_fields(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactError::Status(status));
        }

        info!("Relayed contact message from {}", message.email);
        Ok(())
    }
}
