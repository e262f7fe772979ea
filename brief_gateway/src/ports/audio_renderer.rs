use async_trait::async_trait;
use common::helper::error_chain_fmt;

use super::audio_storage::AudioStorageError;

/// Turns a narrative into a stored audio file
#[async_trait]
pub trait AudioRenderer: Send + Sync {
    /// Returns the relative URL of a newly stored file, never an existing one
    async fn render(&self, text: &str) -> Result<String, AudioRenderingError>;
}

#[derive(thiserror::Error)]
pub enum AudioRenderingError {
    #[error("No audio content received from the text-to-speech provider")]
    NoAudioContent,
    #[error("Audio rendering failed: {0}")]
    ProviderError(String),
    #[error(transparent)]
    StorageError(#[from] AudioStorageError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for AudioRenderingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
