use async_trait::async_trait;
use common::helper::error_chain_fmt;

#[async_trait]
pub trait AudioStorage: Send + Sync {
    async fn save(&self, file_name: &str, content: Vec<u8>) -> Result<(), AudioStorageError>;

    /// `None` when no file has this name
    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, AudioStorageError>;
}

#[derive(thiserror::Error)]
pub enum AudioStorageError {
    #[error("Could not store audio file: {0}")]
    IOError(#[from] std::io::Error),
    #[error("S3 credentials error: {0}")]
    CredentialsError(#[from] s3::creds::error::CredentialsError),
    #[error(transparent)]
    S3Error(#[from] s3::error::S3Error),
}

impl std::fmt::Debug for AudioStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
