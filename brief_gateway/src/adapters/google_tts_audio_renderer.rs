use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tracing::info;
use uuid::Uuid;

use super::gemini_client::check_status;
use crate::{
    configuration::TextToSpeechSettings,
    domain::services::helpers::chunk_text,
    ports::{
        audio_renderer::{AudioRenderer, AudioRenderingError},
        audio_storage::AudioStorage,
    },
};

/// Input limit of a synthesis request, in bytes
const MAX_INPUT_BYTES: usize = 4500;

/// Renders narratives to MP3 with the Google Cloud Text-to-Speech REST API
pub struct GoogleTextToSpeechAudioRenderer {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
    language_code: String,
    voice: String,
    storage: Arc<dyn AudioStorage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechResponse {
    audio_content: Option<String>,
}

impl GoogleTextToSpeechAudioRenderer {
    pub fn try_new(
        settings: &TextToSpeechSettings,
        storage: Arc<dyn AudioStorage>,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_s))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            language_code: settings.language_code.clone(),
            voice: settings.voice.clone(),
            storage,
        })
    }

    #[tracing::instrument(name = "Synthesizing speech chunk", skip(self, text), fields(nb_bytes = text.len()))]
    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, AudioRenderingError> {
        let body = json!({
            "input": { "text": text },
            "voice": { "languageCode": self.language_code, "name": self.voice },
            "audioConfig": { "audioEncoding": "MP3" },
        });

        let response = self
            .http_client
            .post(format!("{}/text:synthesize", self.base_url))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|error| AudioRenderingError::ProviderError(error.to_string()))?;

        let response: SynthesizeSpeechResponse = check_status(response)
            .await
            .map_err(|error| AudioRenderingError::ProviderError(error.to_string()))?
            .json()
            .await
            .map_err(|error| AudioRenderingError::ProviderError(error.to_string()))?;

        decode_audio_content(response.audio_content)
    }
}

fn decode_audio_content(audio_content: Option<String>) -> Result<Vec<u8>, AudioRenderingError> {
    let audio_content = audio_content
        .filter(|content| !content.is_empty())
        .ok_or(AudioRenderingError::NoAudioContent)?;

    STANDARD
        .decode(audio_content)
        .map_err(|error| AudioRenderingError::ProviderError(format!("Invalid audio content: {}", error)))
}

#[async_trait]
impl AudioRenderer for GoogleTextToSpeechAudioRenderer {
    /// Long narratives are synthesized chunk by chunk, and the MP3 frames concatenated
    #[tracing::instrument(name = "Rendering audio", skip(self, text), fields(nb_chars = text.len()))]
    async fn render(&self, text: &str) -> Result<String, AudioRenderingError> {
        let chunks = chunk_text(text, MAX_INPUT_BYTES);
        if chunks.is_empty() {
            return Err(AudioRenderingError::NoAudioContent);
        }

        let mut audio: Vec<u8> = vec![];
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk).await?);
        }

        let file_name = format!("{}.mp3", Uuid::new_v4());
        self.storage.save(&file_name, audio).await?;

        info!(nb_chunks = chunks.len(), %file_name, "Audio rendered");
        Ok(format!("/audio/{}", file_name))
    }
}
