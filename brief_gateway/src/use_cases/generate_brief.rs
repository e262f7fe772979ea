use common::helper::error_chain_fmt;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            article::Article,
            brief::{Brief, NewBrief},
            embedding::EmbeddingDocument,
            feed::Feed,
            narrative::{Narrative, SynthesisRequest},
            profile::Profile,
            timeframe::Timeframe,
        },
        services::interest_catalog::expand_keywords,
    },
    ports::{
        audio_renderer::{AudioRenderer, AudioRenderingError},
        brief_notifier::BriefNotifier,
        brief_repository::BriefRepository,
        content_acquisition::ContentAcquisition,
        feed_repository::FeedRepository,
        narrative_synthesizer::{NarrativeSynthesisError, NarrativeSynthesizer},
        profile_repository::ProfileRepository,
        repository_error::RepositoryError,
        vector_index::VectorIndex,
    },
};

/// Generates a brief end to end, within the caller's request:
/// interests -> keywords -> (articles) -> narrative -> audio -> brief row -> index + email.
///
/// Nothing is persisted before the audio exists. Indexing and email run after the brief
/// row is written, and their failures are only logged.
#[derive(TypedBuilder)]
pub struct GenerateBriefUseCase {
    profile_repository: Arc<dyn ProfileRepository>,
    feed_repository: Arc<dyn FeedRepository>,
    brief_repository: Arc<dyn BriefRepository>,
    /// Two-stage pipeline when set: articles are acquired, then the narrative is written
    /// from them. Otherwise the synthesizer searches the news itself.
    #[builder(default)]
    content_acquisition: Option<Arc<dyn ContentAcquisition>>,
    narrative_synthesizer: Arc<dyn NarrativeSynthesizer>,
    audio_renderer: Arc<dyn AudioRenderer>,
    vector_index: Arc<dyn VectorIndex>,
    notifier: Arc<dyn BriefNotifier>,
    #[builder(default = 10)]
    max_keywords: usize,
    #[builder(default = 30)]
    max_items: usize,
    #[builder(default = 36)]
    default_window_hours: u32,
}

#[derive(Debug)]
pub struct GenerateBriefArgs<'a> {
    pub user_id: Uuid,
    pub feed_id: Option<i64>,
    /// Raw timeframe label of the request
    pub timeframe: Option<&'a str>,
}

#[derive(Debug)]
pub struct GeneratedBrief {
    pub brief: Brief,
    /// Whether an email was attempted, not whether it was delivered
    pub email_sent: bool,
}

/// Effective timeframe of a generation.
///
/// A requested label wins. An unknown one gives no timeframe at all (a "recent" window).
/// Without request, the feed's timeframe is used, then the last 24 hours.
pub fn resolve_timeframe(requested: Option<&str>, feed: Option<&Feed>) -> Option<Timeframe> {
    match requested {
        Some(label) => match label.parse::<Timeframe>() {
            Ok(timeframe) => Some(timeframe),
            Err(error) => {
                warn!(%error, "Unknown timeframe requested, using a recent window");
                None
            }
        },
        None => Some(feed.map(|feed| feed.timeframe).unwrap_or_default()),
    }
}

impl GenerateBriefUseCase {
    #[tracing::instrument(name = "Generating brief", skip(self, args), fields(user_id = %args.user_id, feed_id = ?args.feed_id))]
    pub async fn execute(
        &self,
        args: GenerateBriefArgs<'_>,
    ) -> Result<GeneratedBrief, GenerateBriefError> {
        let GenerateBriefArgs {
            user_id,
            feed_id,
            timeframe,
        } = args;

        // Resolves interests: from the selected feed, or from the profile
        let (feed, profile) = match feed_id {
            Some(feed_id) => {
                let feed = self
                    .feed_repository
                    .find_owned(feed_id, user_id)
                    .await?
                    .ok_or(GenerateBriefError::FeedNotFound)?;
                // Only used for the email
                let profile = self.profile_repository.find_by_user(user_id).await?;
                (Some(feed), profile)
            }
            None => {
                let profile = self
                    .profile_repository
                    .find_by_user(user_id)
                    .await?
                    .ok_or(GenerateBriefError::ProfileNotFound)?;
                (None, Some(profile))
            }
        };

        let (interests, user_context) = match (&feed, &profile) {
            (Some(feed), _) => (&feed.interests, feed.context.as_deref()),
            (None, Some(profile)) => (&profile.interests, None),
            (None, None) => return Err(GenerateBriefError::ProfileNotFound),
        };
        if interests.is_empty() {
            return Err(GenerateBriefError::NoInterests);
        }

        let keywords = expand_keywords(interests);
        if keywords.is_empty() {
            return Err(GenerateBriefError::NoKeywords);
        }

        let timeframe = resolve_timeframe(timeframe, feed.as_ref());
        info!(
            nb_keywords = keywords.len(),
            timeframe = timeframe.map(|t| t.as_str()).unwrap_or("recent"),
            "Interests resolved"
        );

        let articles = match &self.content_acquisition {
            Some(content_acquisition) => {
                let window_hours = timeframe
                    .map(|t| t.window_hours())
                    .unwrap_or(self.default_window_hours);
                let capped = &keywords[..keywords.len().min(self.max_keywords)];

                let articles = content_acquisition
                    .fetch_content(capped, window_hours, self.max_items)
                    .await;
                if articles.is_empty() {
                    return Err(GenerateBriefError::NoArticles);
                }
                articles
            }
            None => vec![],
        };

        let narrative = self
            .narrative_synthesizer
            .synthesize(SynthesisRequest {
                keywords: &keywords,
                articles: &articles,
                timeframe,
                user_context,
            })
            .await?;
        if narrative.text.trim().is_empty() {
            return Err(GenerateBriefError::SynthesisError(
                NarrativeSynthesisError::EmptyNarrative,
            ));
        }

        let audio_url = self.audio_renderer.render(&narrative.text).await?;

        let brief = self
            .brief_repository
            .add(
                NewBrief::builder()
                    .user_id(user_id)
                    .feed_id(feed.as_ref().map(|feed| feed.id))
                    .transcript(narrative.text.clone())
                    .audio_url(audio_url)
                    .build(),
            )
            .await?;
        info!(brief_id = brief.id, "Brief saved");

        let email = profile
            .as_ref()
            .and_then(|profile| profile.email.as_deref())
            .filter(|email| !email.trim().is_empty());

        futures::join!(
            self.index(&brief, &narrative, &articles),
            self.notify(&brief, profile.as_ref(), email),
        );

        Ok(GeneratedBrief {
            brief,
            email_sent: email.is_some(),
        })
    }

    /// Best-effort: errors are logged
    async fn index(&self, brief: &Brief, narrative: &Narrative, articles: &[Article]) {
        let mut documents = vec![EmbeddingDocument {
            content: narrative.text.clone(),
            metadata: json!({
                "type": "summary",
                "summaryId": narrative.summary_id,
                "date": brief.date,
                "feedId": brief.feed_id,
            }),
        }];
        documents.extend(articles.iter().map(|article| EmbeddingDocument {
            content: article.embedding_content(),
            metadata: json!({
                "url": article.url,
                "source": article.source,
                "publishedAt": article.published_at,
            }),
        }));

        if let Err(error) = self.vector_index.index(Some(brief.user_id), documents).await {
            error!(?error, brief_id = brief.id, "Failed to index brief, ignored");
        }
    }

    /// Best-effort: errors are logged
    async fn notify(&self, brief: &Brief, profile: Option<&Profile>, email: Option<&str>) {
        let Some(email) = email else {
            return;
        };
        let name = profile.and_then(|profile| profile.name.as_deref());

        if let Err(error) = self
            .notifier
            .notify(email, name, brief.date, &brief.transcript)
            .await
        {
            error!(?error, brief_id = brief.id, "Failed to email brief, ignored");
        }
    }
}

#[derive(thiserror::Error)]
pub enum GenerateBriefError {
    #[error("Feed not found or unauthorized")]
    FeedNotFound,
    #[error("User profile not found. Please complete onboarding.")]
    ProfileNotFound,
    #[error("No interests configured. Please set up your profile.")]
    NoInterests,
    #[error("No search keywords found. Please select specific topics.")]
    NoKeywords,
    #[error("No articles found for your interests.")]
    NoArticles,
    #[error(transparent)]
    SynthesisError(#[from] NarrativeSynthesisError),
    #[error(transparent)]
    AudioRenderingError(#[from] AudioRenderingError),
    #[error(transparent)]
    RepositoryError(#[from] RepositoryError),
}

impl std::fmt::Debug for GenerateBriefError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
