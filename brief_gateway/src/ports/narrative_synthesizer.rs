use async_trait::async_trait;
use common::helper::error_chain_fmt;

use crate::domain::entities::narrative::{Narrative, SynthesisRequest};

/// Writes the spoken narrative of a brief.
///
/// Without articles in the request, the synthesizer is expected to find the news itself.
#[async_trait]
pub trait NarrativeSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        request: SynthesisRequest<'_>,
    ) -> Result<Narrative, NarrativeSynthesisError>;
}

#[derive(thiserror::Error)]
pub enum NarrativeSynthesisError {
    #[error("Could not generate brief")]
    EmptyNarrative,
    #[error("Narrative synthesis failed: {0}")]
    ProviderError(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for NarrativeSynthesisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
