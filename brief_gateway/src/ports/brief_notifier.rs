use async_trait::async_trait;
use chrono::NaiveDate;
use common::helper::error_chain_fmt;

/// Sends a generated brief to its reader
#[async_trait]
pub trait BriefNotifier: Send + Sync {
    async fn notify(
        &self,
        email: &str,
        name: Option<&str>,
        date: NaiveDate,
        text: &str,
    ) -> Result<(), NotificationError>;
}

#[derive(thiserror::Error)]
pub enum NotificationError {
    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
