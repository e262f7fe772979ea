//! In-memory implementations of the ports, recording how they are called

use anyhow::anyhow;
use async_trait::async_trait;
use brief_gateway::{
    adapters::gemini_narrative_synthesizer::{articles_prompt, grounded_prompt},
    domain::entities::{
        article::Article,
        brief::{Brief, NewBrief},
        embedding::EmbeddingDocument,
        feed::{Feed, NewFeed},
        feedback::NewFeedback,
        interest::InterestSelection,
        narrative::{Narrative, SynthesisRequest},
        profile::Profile,
        timeframe::Timeframe,
        user::{CreatingUser, StoredUser},
    },
    ports::{
        audio_renderer::{AudioRenderer, AudioRenderingError},
        audio_storage::{AudioStorage, AudioStorageError},
        brief_notifier::{BriefNotifier, NotificationError},
        brief_repository::BriefRepository,
        content_acquisition::ContentAcquisition,
        feed_repository::FeedRepository,
        feedback_repository::FeedbackRepository,
        narrative_synthesizer::{NarrativeSynthesisError, NarrativeSynthesizer},
        profile_repository::ProfileRepository,
        repository_error::RepositoryError,
        user_repository::{UserRepository, UserRepositoryError},
        vector_index::{VectorIndex, VectorIndexError},
    },
};
use chrono::{NaiveDate, Utc};
use secrecy::Secret;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<CreatingUser>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add_user(&self, user: &CreatingUser) -> Result<(), UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserRepositoryError::EmailAlreadyUsed(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, UserRepositoryError> {
        let email = email.trim().to_lowercase();
        let users = self.users.lock().unwrap();

        Ok(users
            .iter()
            .find(|user| user.email.as_ref() == email)
            .map(|user| StoredUser {
                id: user.id,
                name: user.name.clone(),
                email: user.email.to_string(),
                password_hash: Secret::new(user.password_hash.as_ref().to_string()),
            }))
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileRepository {
    /// Stores a profile as is, for ex without an email
    pub fn insert(&self, profile: Profile) {
        self.profiles.lock().unwrap().insert(profile.user_id, profile);
    }

    pub fn get(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.get(user_id))
    }

    async fn save_interests(
        &self,
        user_id: Uuid,
        interests: &[InterestSelection],
        email: &str,
        name: &str,
    ) -> Result<(), RepositoryError> {
        self.insert(Profile {
            user_id,
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            interests: interests.to_vec(),
            onboarding_complete: true,
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFeedRepository {
    feeds: Mutex<Vec<Feed>>,
}

impl InMemoryFeedRepository {
    pub fn all(&self) -> Vec<Feed> {
        self.feeds.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedRepository for InMemoryFeedRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Feed>, RepositoryError> {
        let mut feeds: Vec<Feed> = self
            .all()
            .into_iter()
            .filter(|feed| feed.user_id == user_id)
            .collect();
        feeds.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(feeds)
    }

    async fn add(&self, feed: NewFeed) -> Result<Feed, RepositoryError> {
        let mut feeds = self.feeds.lock().unwrap();
        let feed = Feed {
            id: feeds.len() as i64 + 1,
            user_id: feed.user_id,
            name: feed.name,
            interests: feed.interests,
            context: feed.context,
            timeframe: feed.timeframe,
            created_at: Utc::now(),
        };
        feeds.push(feed.clone());
        Ok(feed)
    }

    async fn find_owned(&self, id: i64, user_id: Uuid) -> Result<Option<Feed>, RepositoryError> {
        Ok(self
            .all()
            .into_iter()
            .find(|feed| feed.id == id && feed.user_id == user_id))
    }

    async fn delete_owned(&self, id: i64, user_id: Uuid) -> Result<bool, RepositoryError> {
        let mut feeds = self.feeds.lock().unwrap();
        let before = feeds.len();
        feeds.retain(|feed| !(feed.id == id && feed.user_id == user_id));
        Ok(feeds.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryBriefRepository {
    briefs: Mutex<Vec<Brief>>,
}

impl InMemoryBriefRepository {
    pub fn all(&self) -> Vec<Brief> {
        self.briefs.lock().unwrap().clone()
    }
}

#[async_trait]
impl BriefRepository for InMemoryBriefRepository {
    async fn add(&self, brief: NewBrief) -> Result<Brief, RepositoryError> {
        let mut briefs = self.briefs.lock().unwrap();
        let brief = Brief {
            id: briefs.len() as i64 + 1,
            user_id: brief.user_id,
            feed_id: brief.feed_id,
            date: brief.date,
            transcript: brief.transcript,
            audio_url: brief.audio_url,
            status: brief.status,
            created_at: Utc::now(),
        };
        briefs.push(brief.clone());
        Ok(brief)
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Brief>, RepositoryError> {
        let mut briefs: Vec<Brief> = self
            .all()
            .into_iter()
            .filter(|brief| brief.user_id == user_id)
            .collect();
        briefs.sort_by(|a, b| (b.date, b.created_at, b.id).cmp(&(a.date, a.created_at, a.id)));
        briefs.truncate(limit as usize);
        Ok(briefs)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Brief>, RepositoryError> {
        Ok(self.all().into_iter().find(|brief| brief.id == id))
    }
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    feedback: Mutex<Vec<NewFeedback>>,
}

impl InMemoryFeedbackRepository {
    pub fn all(&self) -> Vec<NewFeedback> {
        self.feedback.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn add(&self, feedback: &NewFeedback) -> Result<(), RepositoryError> {
        self.feedback.lock().unwrap().push(feedback.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAudioStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl AudioStorage for InMemoryAudioStorage {
    async fn save(&self, file_name: &str, content: Vec<u8>) -> Result<(), AudioStorageError> {
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), content);
        Ok(())
    }

    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, AudioStorageError> {
        Ok(self.files.lock().unwrap().get(file_name).cloned())
    }
}

/// Returns 3 fixed articles, or none when built with `empty`
#[derive(Default)]
pub struct StubContentAcquisition {
    empty: bool,
    calls: Mutex<Vec<(Vec<String>, u32)>>,
}

impl StubContentAcquisition {
    pub fn empty() -> Self {
        Self {
            empty: true,
            ..Default::default()
        }
    }

    /// Keywords and window hours of every call
    pub fn calls(&self) -> Vec<(Vec<String>, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn fixed_articles() -> Vec<Article> {
    (1..=3)
        .map(|i| Article {
            title: format!("Deal {}", i),
            description: format!("A merger was announced ({})", i),
            url: format!("https://news.example.com/deal-{}", i),
            published_at: format!("2024-10-1{}T08:00:00Z", i),
            source: "Example News".to_string(),
        })
        .collect()
}

#[async_trait]
impl ContentAcquisition for StubContentAcquisition {
    async fn fetch_content(
        &self,
        keywords: &[String],
        window_hours: u32,
        max_items: usize,
    ) -> Vec<Article> {
        self.calls
            .lock()
            .unwrap()
            .push((keywords.to_vec(), window_hours));
        if self.empty {
            return vec![];
        }
        fixed_articles().into_iter().take(max_items).collect()
    }
}

/// What the synthesizer received, with the prompt the Gemini synthesizer would send
#[derive(Debug, Clone)]
pub struct RecordedSynthesis {
    pub keywords: Vec<String>,
    pub nb_articles: usize,
    pub timeframe: Option<Timeframe>,
    pub user_context: Option<String>,
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum SynthesisBehavior {
    /// Writes "BRIEF TEXT"
    #[default]
    Echo,
    /// Writes only whitespace
    Blank,
    Failing,
}

#[derive(Default)]
pub struct StubNarrativeSynthesizer {
    behavior: SynthesisBehavior,
    requests: Mutex<Vec<RecordedSynthesis>>,
}

impl StubNarrativeSynthesizer {
    pub fn new(behavior: SynthesisBehavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedSynthesis> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrativeSynthesizer for StubNarrativeSynthesizer {
    async fn synthesize(
        &self,
        request: SynthesisRequest<'_>,
    ) -> Result<Narrative, NarrativeSynthesisError> {
        let today = Utc::now().date_naive();
        let prompt = if request.articles.is_empty() {
            grounded_prompt(&request, today)
        } else {
            articles_prompt(&request, today)
        };

        self.requests.lock().unwrap().push(RecordedSynthesis {
            keywords: request.keywords.to_vec(),
            nb_articles: request.articles.len(),
            timeframe: request.timeframe,
            user_context: request.user_context.map(str::to_string),
            prompt,
        });

        let text = match self.behavior {
            SynthesisBehavior::Echo => "BRIEF TEXT",
            SynthesisBehavior::Blank => "  \n ",
            SynthesisBehavior::Failing => {
                return Err(NarrativeSynthesisError::ProviderError(
                    "Model is overloaded".to_string(),
                ))
            }
        };

        Ok(Narrative {
            text: text.to_string(),
            summary_id: Uuid::new_v4(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RenderingFailure {
    /// The speech provider rejects the text
    Provider,
    /// The audio file cannot be written
    Storage,
}

/// Returns `/audio/test.mp3` unless built with a failure
#[derive(Default)]
pub struct StubAudioRenderer {
    failure: Option<RenderingFailure>,
    calls: AtomicUsize,
}

impl StubAudioRenderer {
    pub fn new(failure: Option<RenderingFailure>) -> Self {
        Self {
            failure,
            ..Default::default()
        }
    }

    pub fn nb_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioRenderer for StubAudioRenderer {
    async fn render(&self, _text: &str) -> Result<String, AudioRenderingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            None => Ok("/audio/test.mp3".to_string()),
            Some(RenderingFailure::Provider) => Err(AudioRenderingError::ProviderError(
                "Voice not available".to_string(),
            )),
            Some(RenderingFailure::Storage) => Err(AudioRenderingError::StorageError(
                AudioStorageError::IOError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "No space left on /var/audio",
                )),
            )),
        }
    }
}

#[derive(Default)]
pub struct RecordingVectorIndex {
    failing: bool,
    documents: Mutex<Vec<(Option<Uuid>, EmbeddingDocument)>>,
}

impl RecordingVectorIndex {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn documents(&self) -> Vec<(Option<Uuid>, EmbeddingDocument)> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for RecordingVectorIndex {
    async fn index(
        &self,
        user_id: Option<Uuid>,
        documents: Vec<EmbeddingDocument>,
    ) -> Result<(), VectorIndexError> {
        if self.failing {
            return Err(VectorIndexError::Other(anyhow!("Vector index is down")));
        }

        self.documents
            .lock()
            .unwrap()
            .extend(documents.into_iter().map(|document| (user_id, document)));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub email: String,
    pub name: Option<String>,
    pub date: NaiveDate,
    pub text: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    failing: bool,
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingNotifier {
    /// Every email is rejected, nothing is recorded
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BriefNotifier for RecordingNotifier {
    async fn notify(
        &self,
        email: &str,
        name: Option<&str>,
        date: NaiveDate,
        text: &str,
    ) -> Result<(), NotificationError> {
        if self.failing {
            return Err(NotificationError::Rejected("Invalid sender domain".to_string()));
        }

        self.sent.lock().unwrap().push(SentEmail {
            email: email.to_string(),
            name: name.map(str::to_string),
            date,
            text: text.to_string(),
        });
        Ok(())
    }
}
