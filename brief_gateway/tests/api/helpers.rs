use brief_gateway::{
    configuration::get_configuration,
    ports::content_acquisition::ContentAcquisition,
    startup::{AppDependencies, Application},
};
use common::telemetry::{get_tracing_subscriber, init_tracing_subscriber};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::doubles::{
    InMemoryAudioStorage, InMemoryBriefRepository, InMemoryFeedRepository,
    InMemoryFeedbackRepository, InMemoryProfileRepository, InMemoryUserRepository,
    RecordingNotifier, RecordingVectorIndex, RenderingFailure, StubAudioRenderer,
    StubContentAcquisition, StubNarrativeSynthesizer, SynthesisBehavior,
};

// Ensures that the `tracing` stack is only initialized once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // The sink is part of the type returned by `get_tracing_subscriber`,
    // so each branch initializes its own subscriber.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            get_tracing_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_tracing_subscriber(subscriber);
    } else {
        let subscriber =
            get_tracing_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_tracing_subscriber(subscriber);
    };
});

pub const TEST_PASSWORD: &str = "correct horse battery";

/// Collaborators a test can tweak before the application starts
#[derive(Default)]
pub struct TestAppOptions {
    /// Acquires articles before the synthesis
    pub two_stage: bool,
    /// Acquisition finds no article
    pub empty_acquisition: bool,
    pub synthesis: SynthesisBehavior,
    pub rendering_failure: Option<RenderingFailure>,
    /// Every indexing call fails
    pub failing_index: bool,
    /// Every email is rejected
    pub failing_notifier: bool,
}

/// A running application with in-memory collaborators the tests can inspect
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub feeds: Arc<InMemoryFeedRepository>,
    pub briefs: Arc<InMemoryBriefRepository>,
    pub feedback: Arc<InMemoryFeedbackRepository>,
    pub audio_storage: Arc<InMemoryAudioStorage>,
    pub content_acquisition: Arc<StubContentAcquisition>,
    pub narrative_synthesizer: Arc<StubNarrativeSynthesizer>,
    pub audio_renderer: Arc<StubAudioRenderer>,
    pub vector_index: Arc<RecordingVectorIndex>,
    pub notifier: Arc<RecordingNotifier>,
}

/// A signed up user and the client carrying their session cookie
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub client: reqwest::Client,
}

/// A test API client / test suite
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// A client keeping the cookies it receives, like a browser would
    pub fn new_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build the test client")
    }

    pub async fn sign_up(&self, client: &reqwest::Client, body: &Value) -> reqwest::Response {
        client
            .post(self.url("/api/auth/sign-up/email"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn sign_in(&self, client: &reqwest::Client, body: &Value) -> reqwest::Response {
        client
            .post(self.url("/api/auth/sign-in/email"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Signs up a new user with a random email, returning their session client
    pub async fn signed_up_user(&self, name: &str) -> TestUser {
        let client = self.new_client();
        let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());

        let response = self
            .sign_up(
                &client,
                &json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
            )
            .await;
        assert_eq!(200, response.status().as_u16());

        let body: Value = response.json().await.unwrap();
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();

        TestUser {
            id,
            email,
            name: name.to_string(),
            client,
        }
    }
}

impl TestUser {
    pub async fn get(&self, app: &TestApp, path: &str) -> reqwest::Response {
        self.client
            .get(app.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, app: &TestApp, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(app.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, app: &TestApp, path: &str) -> reqwest::Response {
        self.client
            .delete(app.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Saves the profile interests through the API: the profile gets the account email
    pub async fn save_interests(&self, app: &TestApp, interests: Value) {
        let response = self
            .post(app, "/api/profile", &json!({ "interests": interests }))
            .await;
        assert_eq!(200, response.status().as_u16());
    }

    pub async fn create_feed(&self, app: &TestApp, body: Value) -> Value {
        let response = self.post(app, "/api/profile/feeds", &body).await;
        assert_eq!(200, response.status().as_u16());

        let body: Value = response.json().await.unwrap();
        body["feed"].clone()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestAppOptions::default()).await
}

/// Launches the server as a background task
///
/// When a tokio runtime is shut down all tasks spawned on it are dropped.
/// tokio::test spins up a new runtime at the beginning of each test case and they shut down at the end of each test case.
/// Therefore no need to implement any clean up logic to avoid leaking resources between test runs
pub async fn spawn_app_with(options: TestAppOptions) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Uses a random OS port
        c.application.port = 0;
        c
    };

    let profiles = Arc::new(InMemoryProfileRepository::default());
    let feeds = Arc::new(InMemoryFeedRepository::default());
    let briefs = Arc::new(InMemoryBriefRepository::default());
    let feedback = Arc::new(InMemoryFeedbackRepository::default());
    let audio_storage = Arc::new(InMemoryAudioStorage::default());
    let content_acquisition = Arc::new(if options.empty_acquisition {
        StubContentAcquisition::empty()
    } else {
        StubContentAcquisition::default()
    });
    let narrative_synthesizer = Arc::new(StubNarrativeSynthesizer::new(options.synthesis));
    let audio_renderer = Arc::new(StubAudioRenderer::new(options.rendering_failure));
    let vector_index = Arc::new(if options.failing_index {
        RecordingVectorIndex::failing()
    } else {
        RecordingVectorIndex::default()
    });
    let notifier = Arc::new(if options.failing_notifier {
        RecordingNotifier::failing()
    } else {
        RecordingNotifier::default()
    });

    let dependencies = AppDependencies::builder()
        .user_repository(Arc::new(InMemoryUserRepository::default()))
        .profile_repository(profiles.clone())
        .feed_repository(feeds.clone())
        .brief_repository(briefs.clone())
        .feedback_repository(feedback.clone())
        .audio_storage(audio_storage.clone())
        .content_acquisition(
            options
                .two_stage
                .then(|| content_acquisition.clone() as Arc<dyn ContentAcquisition>),
        )
        .narrative_synthesizer(narrative_synthesizer.clone())
        .audio_renderer(audio_renderer.clone())
        .vector_index(vector_index.clone())
        .notifier(notifier.clone())
        .build();

    // Only one actix-web worker is needed for integration tests
    let application = Application::build_with_dependencies(configuration, Some(1), dependencies)
        .expect("Failed to build application.");
    let port = application.port();

    // Launches the application as a background task
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        port,
        profiles,
        feeds,
        briefs,
        feedback,
        audio_storage,
        content_acquisition,
        narrative_synthesizer,
        audio_renderer,
        vector_index,
        notifier,
    }
}
