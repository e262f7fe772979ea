use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::{
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub cors: CorsSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub pipeline: PipelineSettings,
    pub generative: GenerativeSettings,
    pub news_api: NewsApiSettings,
    pub text_to_speech: TextToSpeechSettings,
    pub email: EmailSettings,
    pub audio_storage: AudioStorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    /// Frontend origins allowed to send credentialed requests
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    // Determines if we demand the connection to be encrypted or not
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        // Lowers sqlx logs from INFO to TRACE level.
        self.without_db()
            .database(&self.database_name)
            .log_statements(tracing::log::LevelFilter::Trace)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub secret: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub expire_in_s: i64,
    pub cookie_name: String,
    /// Set the `Secure` attribute on the session cookie (HTTPS deployments)
    pub secure_cookie: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStrategy {
    /// The synthesizer searches the web itself, no separate acquisition step
    Grounded,
    /// Articles are acquired first, then the narrative is written from them
    TwoStage,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionKind {
    NewsApi,
    GroundedSearch,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    pub strategy: PipelineStrategy,
    pub acquisition: AcquisitionKind,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_keywords: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_items: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_window_hours: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerativeSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_s: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsApiSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_s: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TextToSpeechSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub language_code: String,
    pub voice: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_s: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailSettings {
    pub enabled: bool,
    pub api_key: Secret<String>,
    pub base_url: String,
    pub sender: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_s: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AudioStorageKind {
    FileSystem,
    S3,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioStorageSettings {
    pub kind: AudioStorageKind,
    /// Directory used by the file system storage
    pub directory: String,
    pub object_storage: ObjectStorageSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ObjectStorageSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub region: String,
    /// A bucket for each environment
    pub bucket_name: String,
}

impl ObjectStorageSettings {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Extracts app settings from configuration files and env variables
///
/// `base.yaml` holds the settings shared by every environment, `local.yaml` and `production.yaml`
/// override them. The environment is picked with `APP_ENVIRONMENT` and defaults to `local`.
///
/// Environment variables prefixed with `APP` and using `__` as separator win over the files.
/// For ex: `APP_GENERATIVE__API_KEY=...` sets `Settings.generative.api_key`
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|error| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", error))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
