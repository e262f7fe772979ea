use async_trait::async_trait;
use std::path::PathBuf;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::ports::audio_storage::{AudioStorage, AudioStorageError};

/// Stores audio files in a local directory, an existing file is never replaced
pub struct AudioFileSystemStorage {
    directory: PathBuf,
}

impl AudioFileSystemStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl AudioStorage for AudioFileSystemStorage {
    #[tracing::instrument(name = "Saving audio file to disk", skip(self, content), fields(nb_bytes = content.len()))]
    async fn save(&self, file_name: &str, content: Vec<u8>) -> Result<(), AudioStorageError> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.directory.join(file_name))
            .await?;
        file.write_all(&content).await?;
        file.flush().await?;

        Ok(())
    }

    #[tracing::instrument(name = "Loading audio file from disk", skip(self))]
    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, AudioStorageError> {
        match tokio::fs::read(self.directory.join(file_name)).await {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}
