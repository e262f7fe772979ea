use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, Secret};
use serde_json::json;
use std::time::Duration;
use tracing::info;

use crate::{
    configuration::EmailSettings,
    ports::brief_notifier::{BriefNotifier, NotificationError},
};

/// Sends briefs through a transactional email HTTP API
pub struct HttpEmailNotifier {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
    sender: String,
}

impl HttpEmailNotifier {
    pub fn try_new(settings: &EmailSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_s))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            sender: settings.sender.clone(),
        })
    }
}

pub fn email_subject(date: NaiveDate) -> String {
    format!("Your brief for {}", date.format("%Y-%m-%d"))
}

fn email_text(name: Option<&str>, text: &str) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Hi {},\n\n{}", name, text),
        None => text.to_string(),
    }
}

#[async_trait]
impl BriefNotifier for HttpEmailNotifier {
    #[tracing::instrument(name = "Sending brief by email", skip(self, email, name, text))]
    async fn notify(
        &self,
        email: &str,
        name: Option<&str>,
        date: NaiveDate,
        text: &str,
    ) -> Result<(), NotificationError> {
        let body = json!({
            "from": self.sender,
            "to": [email],
            "subject": email_subject(date),
            "text": email_text(name, text),
        });

        let response = self
            .http_client
            .post(&self.base_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|error| NotificationError::Other(error.into()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected(format!("{}: {}", status, body)));
        }

        info!("Brief sent by email");
        Ok(())
    }
}

/// Used when email delivery is disabled: only logs the brief would have been sent
pub struct LoggingNotifier;

#[async_trait]
impl BriefNotifier for LoggingNotifier {
    async fn notify(
        &self,
        _email: &str,
        _name: Option<&str>,
        date: NaiveDate,
        _text: &str,
    ) -> Result<(), NotificationError> {
        info!(subject = %email_subject(date), "Email delivery disabled, brief not sent");
        Ok(())
    }
}
