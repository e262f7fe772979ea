use actix_cors::Cors;
use actix_web::{
    dev::Server,
    http::header,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{net::TcpListener, sync::Arc};
use tracing::info;
use tracing_actix_web::TracingLogger;
use typed_builder::TypedBuilder;

use crate::{
    adapters::{
        gemini_client::{GeminiClient, GeminiClientError},
        gemini_narrative_synthesizer::GeminiNarrativeSynthesizer,
        gemini_text_embedder::GeminiTextEmbedder,
        google_tts_audio_renderer::GoogleTextToSpeechAudioRenderer,
        grounded_search_content_acquisition::GroundedSearchContentAcquisition,
        http_email_notifier::{HttpEmailNotifier, LoggingNotifier},
        news_api_content_acquisition::NewsApiContentAcquisition,
    },
    configuration::{
        AcquisitionKind, AudioStorageKind, DatabaseSettings, PipelineStrategy, Settings,
    },
    controllers::{
        create_feed, delete_feed, generate_brief, get_audio, get_brief, get_profile, get_session,
        health_check, json_error_handler, list_briefs, list_feeds, list_interests,
        path_error_handler, save_profile, sign_in_account, sign_out_account, sign_up_account,
        submit_feedback,
    },
    middlewares::session_authentication::RequireSession,
    ports::{
        audio_renderer::AudioRenderer,
        audio_storage::{AudioStorage, AudioStorageError},
        brief_notifier::BriefNotifier,
        brief_repository::BriefRepository,
        content_acquisition::ContentAcquisition,
        feed_repository::FeedRepository,
        feedback_repository::FeedbackRepository,
        narrative_synthesizer::NarrativeSynthesizer,
        profile_repository::ProfileRepository,
        user_repository::UserRepository,
        vector_index::VectorIndex,
    },
    repositories::{
        audio_file_system_storage::AudioFileSystemStorage, audio_s3_storage::AudioS3Storage,
        brief_postgres_repository::BriefPostgresRepository,
        embedding_postgres_repository::EmbeddingPostgresRepository,
        feed_postgres_repository::FeedPostgresRepository,
        feedback_postgres_repository::FeedbackPostgresRepository,
        profile_postgres_repository::ProfilePostgresRepository,
        session_jwt_repository::SessionJwtRepository,
        user_postgres_repository::UserPostgresRepository,
    },
    use_cases::{embedding_vector_index::EmbeddingVectorIndex, generate_brief::GenerateBriefUseCase},
};

/// Every collaborator of the HTTP layer, behind its port.
///
/// `Application::build` wires the Postgres and provider implementations,
/// integration tests inject in-memory doubles with `Application::build_with_dependencies`.
#[derive(Clone, TypedBuilder)]
pub struct AppDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub feed_repository: Arc<dyn FeedRepository>,
    pub brief_repository: Arc<dyn BriefRepository>,
    pub feedback_repository: Arc<dyn FeedbackRepository>,
    pub audio_storage: Arc<dyn AudioStorage>,
    /// Only set for the two-stage pipeline
    #[builder(default)]
    pub content_acquisition: Option<Arc<dyn ContentAcquisition>>,
    pub narrative_synthesizer: Arc<dyn NarrativeSynthesizer>,
    pub audio_renderer: Arc<dyn AudioRenderer>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub notifier: Arc<dyn BriefNotifier>,
}

/// Holds the newly built server, and some useful properties
pub struct Application {
    server: Server,
    port: u16,
}

#[derive(thiserror::Error, Debug)]
pub enum ApplicationBuildError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Failed to migrate the database: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    AudioStorageError(#[from] AudioStorageError),
    #[error("Failed to build an HTTP client: {0}")]
    HttpClientError(#[from] reqwest::Error),
    #[error(transparent)]
    GeminiClientError(#[from] GeminiClientError),
}

impl Application {
    /// Builds the application with its Postgres repositories and HTTP providers
    ///
    /// # Parameters
    /// - nb_workers: number of actix-web workers
    ///   if `None`, the number of available physical CPUs is used as the worker count.
    #[tracing::instrument(name = "Building application", skip(settings))]
    pub async fn build(
        settings: Settings,
        nb_workers: Option<usize>,
    ) -> Result<Self, ApplicationBuildError> {
        let connection_pool = get_connection_pool(&settings.database);

        sqlx::migrate!("./migrations").run(&connection_pool).await?;
        info!("Database migrated");

        let dependencies = build_dependencies(&settings, connection_pool).await?;

        Self::build_with_dependencies(settings, nb_workers, dependencies)
    }

    /// Builds the application around already constructed collaborators
    pub fn build_with_dependencies(
        settings: Settings,
        nb_workers: Option<usize>,
        dependencies: AppDependencies,
    ) -> Result<Self, ApplicationBuildError> {
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, settings, nb_workers, dependencies)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// This function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        info!("Running server ...");
        self.server.await
    }
}

/// Wires the production implementations of every port
#[tracing::instrument(name = "Building dependencies", skip(settings, pool))]
pub async fn build_dependencies(
    settings: &Settings,
    pool: PgPool,
) -> Result<AppDependencies, ApplicationBuildError> {
    let gemini_client = Arc::new(GeminiClient::try_new(&settings.generative)?);

    let audio_storage: Arc<dyn AudioStorage> = match settings.audio_storage.kind {
        AudioStorageKind::FileSystem => Arc::new(AudioFileSystemStorage::new(
            &settings.audio_storage.directory,
        )),
        AudioStorageKind::S3 => Arc::new(
            AudioS3Storage::set_up(&settings.audio_storage.object_storage).await?,
        ),
    };

    let content_acquisition = match settings.pipeline.strategy {
        PipelineStrategy::Grounded => None,
        PipelineStrategy::TwoStage => {
            let content_acquisition: Arc<dyn ContentAcquisition> =
                match settings.pipeline.acquisition {
                    AcquisitionKind::NewsApi => {
                        Arc::new(NewsApiContentAcquisition::try_new(&settings.news_api)?)
                    }
                    AcquisitionKind::GroundedSearch => Arc::new(
                        GroundedSearchContentAcquisition::new(gemini_client.clone()),
                    ),
                };
            Some(content_acquisition)
        }
    };
    info!(
        strategy = ?settings.pipeline.strategy,
        acquisition = ?settings.pipeline.acquisition,
        "Pipeline selected"
    );

    let notifier: Arc<dyn BriefNotifier> = if settings.email.enabled {
        Arc::new(HttpEmailNotifier::try_new(&settings.email)?)
    } else {
        Arc::new(LoggingNotifier)
    };

    let vector_index = EmbeddingVectorIndex::new(
        Arc::new(GeminiTextEmbedder::new(gemini_client.clone())),
        Arc::new(EmbeddingPostgresRepository::new(pool.clone())),
    );
    let audio_renderer =
        GoogleTextToSpeechAudioRenderer::try_new(&settings.text_to_speech, audio_storage.clone())?;

    Ok(AppDependencies::builder()
        .user_repository(Arc::new(UserPostgresRepository::new(pool.clone())))
        .profile_repository(Arc::new(ProfilePostgresRepository::new(pool.clone())))
        .feed_repository(Arc::new(FeedPostgresRepository::new(pool.clone())))
        .brief_repository(Arc::new(BriefPostgresRepository::new(pool.clone())))
        .feedback_repository(Arc::new(FeedbackPostgresRepository::new(pool)))
        .audio_storage(audio_storage)
        .content_acquisition(content_acquisition)
        .narrative_synthesizer(Arc::new(GeminiNarrativeSynthesizer::new(gemini_client)))
        .audio_renderer(Arc::new(audio_renderer))
        .vector_index(Arc::new(vector_index))
        .notifier(notifier)
        .build())
}

/// listener: the consumer binds their own port
///
/// TracingLogger middleware: helps collecting telemetry data.
/// It generates a unique identifier for each incoming request: `request_id`.
///
/// # Parameters
/// - nb_workers: number of actix-web workers
///   if `None`, the number of available physical CPUs is used as the worker count.
pub fn run(
    listener: TcpListener,
    settings: Settings,
    nb_workers: Option<usize>,
    dependencies: AppDependencies,
) -> Result<Server, std::io::Error> {
    let generate_brief_use_case = Data::new(
        GenerateBriefUseCase::builder()
            .profile_repository(dependencies.profile_repository.clone())
            .feed_repository(dependencies.feed_repository.clone())
            .brief_repository(dependencies.brief_repository.clone())
            .content_acquisition(dependencies.content_acquisition.clone())
            .narrative_synthesizer(dependencies.narrative_synthesizer.clone())
            .audio_renderer(dependencies.audio_renderer.clone())
            .vector_index(dependencies.vector_index.clone())
            .notifier(dependencies.notifier.clone())
            .max_keywords(settings.pipeline.max_keywords)
            .max_items(settings.pipeline.max_items)
            .default_window_hours(settings.pipeline.default_window_hours)
            .build(),
    );

    // Wraps the ports in `actix_web::Data` (`Arc`) to be able to access them from handlers.
    // They are shared among all workers.
    let session_repository = Data::new(SessionJwtRepository::new(&settings.session));
    let user_repository: Data<dyn UserRepository> = Data::from(dependencies.user_repository);
    let profile_repository: Data<dyn ProfileRepository> =
        Data::from(dependencies.profile_repository);
    let feed_repository: Data<dyn FeedRepository> = Data::from(dependencies.feed_repository);
    let brief_repository: Data<dyn BriefRepository> = Data::from(dependencies.brief_repository);
    let feedback_repository: Data<dyn FeedbackRepository> =
        Data::from(dependencies.feedback_repository);
    let vector_index: Data<dyn VectorIndex> = Data::from(dependencies.vector_index);
    let audio_storage: Data<dyn AudioStorage> = Data::from(dependencies.audio_storage);

    let allowed_origins = settings.cors.allowed_origins;

    // `move` to capture variables from the surrounding environment
    let server = HttpServer::new(move || {
        info!("Starting actix-web worker");

        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(session_repository.clone())
            .app_data(user_repository.clone())
            .app_data(profile_repository.clone())
            .app_data(feed_repository.clone())
            .app_data(brief_repository.clone())
            .app_data(feedback_repository.clone())
            .app_data(vector_index.clone())
            .app_data(audio_storage.clone())
            .app_data(generate_brief_use_case.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/audio/{file_name}", web::get().to(get_audio))
            .route("/api/interests", web::get().to(list_interests))
            .service(
                web::scope("/api/auth")
                    .route("/sign-up/email", web::post().to(sign_up_account))
                    .route("/sign-in/email", web::post().to(sign_in_account))
                    .route("/sign-out", web::post().to(sign_out_account))
                    .route("/get-session", web::get().to(get_session)),
            )
            .service(
                web::scope("/api/profile")
                    .wrap(RequireSession::new(session_repository.clone()))
                    .route("", web::get().to(get_profile))
                    .route("", web::post().to(save_profile))
                    .route("/feeds", web::get().to(list_feeds))
                    .route("/feeds", web::post().to(create_feed))
                    .route("/feeds/{feed_id}", web::delete().to(delete_feed)),
            )
            .service(
                web::scope("/api/brief")
                    .wrap(RequireSession::new(session_repository.clone()))
                    .route("", web::get().to(list_briefs))
                    .route("/generate", web::post().to(generate_brief))
                    .route("/{brief_id}", web::get().to(get_brief)),
            )
            .service(
                web::scope("/api/feedback")
                    .wrap(RequireSession::new(session_repository.clone()))
                    .route("", web::post().to(submit_feedback)),
            )
    })
    .listen(listener)?;

    // If no workers were set, use the actix-web settings (number of workers = number of physical CPUs)
    if let Some(nb_workers) = nb_workers {
        return Ok(server.workers(nb_workers).run());
    }

    // No await
    Ok(server.run())
}

/// Credentialed cross-origin requests from the configured frontends only
fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .supports_credentials()
        .max_age(3600)
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(settings.with_db())
}
