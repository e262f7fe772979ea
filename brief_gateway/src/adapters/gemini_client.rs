use common::helper::error_chain_fmt;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::{configuration::GenerativeSettings, domain::entities::embedding::Embedding};

/// Client of a Gemini-style generative API, shared by the synthesis, the grounded search and
/// the embeddings
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
    model: String,
    embedding_model: String,
}

/// Text generated by the model, with the web pages it used when grounded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedContentsResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Embedding,
}

impl From<GenerateContentResponse> for Generation {
    /// Only the first candidate is used: its text parts are concatenated
    fn from(response: GenerateContentResponse) -> Self {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return Generation::default();
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        web.uri.filter(|uri| !uri.is_empty()).map(|uri| Citation {
                            uri,
                            title: web.title,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Generation { text, citations }
    }
}

impl GeminiClient {
    pub fn try_new(settings: &GenerativeSettings) -> Result<Self, GeminiClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_s))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            embedding_model: settings.embedding_model.clone(),
        })
    }

    /// Generates text from a single prompt
    ///
    /// With `with_search`, the model can ground its answer on a web search.
    #[tracing::instrument(name = "Generating content with Gemini", skip(self, prompt), fields(model = %self.model))]
    pub async fn generate(
        &self,
        prompt: &str,
        with_search: bool,
    ) -> Result<Generation, GeminiClientError> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });
        if with_search {
            body["tools"] = json!([{ "google_search": {} }]);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let response = check_status(response).await?;
        let response: GenerateContentResponse = response.json().await?;

        Ok(response.into())
    }

    /// Embeds texts in one batch, one embedding per text
    #[tracing::instrument(name = "Embedding texts with Gemini", skip(self, texts), fields(nb_texts = texts.len()))]
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, GeminiClientError> {
        let model = format!("models/{}", self.embedding_model);
        let requests: Vec<_> = texts
            .iter()
            .map(|text| json!({ "model": model, "content": { "parts": [{ "text": text }] } }))
            .collect();

        let url = format!("{}/{}:batchEmbedContents", self.base_url, model);
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&json!({ "requests": requests }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let response: BatchEmbedContentsResponse = response.json().await?;

        Ok(response
            .embeddings
            .into_iter()
            .map(|embedding| embedding.values)
            .collect())
    }
}

/// Turns a non-success response into an error carrying the provider message
pub async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, GeminiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GeminiClientError::UnexpectedStatus { status, body })
}

#[derive(thiserror::Error)]
pub enum GeminiClientError {
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),
    #[error("Provider responded with {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl std::fmt::Debug for GeminiClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
