use async_trait::async_trait;
use s3::{creds::Credentials, error::S3Error, Bucket, BucketConfiguration, Region};
use secrecy::ExposeSecret;
use tracing::info;

use crate::{
    configuration::ObjectStorageSettings,
    ports::audio_storage::{AudioStorage, AudioStorageError},
};

/// Stores audio files in an S3-compatible bucket, one bucket per environment
pub struct AudioS3Storage {
    bucket: Bucket,
}

impl AudioS3Storage {
    pub fn new(bucket: Bucket) -> Self {
        Self { bucket }
    }

    /// Gets the configured bucket, creating it if it does not exist yet
    #[tracing::instrument(name = "Setting up S3 audio storage", skip(settings))]
    pub async fn set_up(settings: &ObjectStorageSettings) -> Result<Self, AudioStorageError> {
        let region = Region::Custom {
            region: settings.region.to_owned(),
            endpoint: settings.endpoint(),
        };

        let credentials = Credentials::new(
            Some(&settings.username),
            Some(settings.password.expose_secret()),
            None,
            None,
            None,
        )?;

        let bucket = Bucket::new(&settings.bucket_name, region.clone(), credentials.clone())?
            .with_path_style();

        // Only a bucket not found (404) leads to its creation
        if let Err(error) = bucket.head_object("/").await {
            match error {
                S3Error::Http(404, _) => {}
                _ => return Err(error.into()),
            }

            info!("Unknown bucket {}, creating it ...", settings.bucket_name);
            Bucket::create_with_path_style(
                &settings.bucket_name,
                region,
                credentials,
                BucketConfiguration::default(),
            )
            .await?;
        }

        info!(
            "Bucket {} has been correctly instantiated",
            settings.bucket_name
        );
        Ok(Self::new(bucket))
    }
}

#[async_trait]
impl AudioStorage for AudioS3Storage {
    #[tracing::instrument(name = "Saving audio file to bucket", skip(self, content), fields(nb_bytes = content.len()))]
    async fn save(&self, file_name: &str, content: Vec<u8>) -> Result<(), AudioStorageError> {
        self.bucket
            .put_object_with_content_type(file_name, &content, "audio/mpeg")
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Loading audio file from bucket", skip(self))]
    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, AudioStorageError> {
        match self.bucket.get_object(file_name).await {
            Ok(response) if response.status_code() == 404 => Ok(None),
            Ok(response) => Ok(Some(response.bytes().to_vec())),
            Err(S3Error::Http(404, _)) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}
