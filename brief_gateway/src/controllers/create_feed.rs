use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::helper::error_chain_fmt;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    domain::entities::{
        feed::NewFeed,
        interest::{normalize_selections, InterestSelection},
        session_user::SessionUser,
        timeframe::Timeframe,
    },
    ports::{feed_repository::FeedRepository, repository_error::RepositoryError},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFeedBodyData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub interests: Vec<InterestSelection>,
    pub context: Option<String>,
    /// `24h` when absent
    pub timeframe: Option<String>,
}

#[tracing::instrument(name = "Create feed", skip(user, feed_repository, body), fields(user_id = %user.id))]
pub async fn create_feed(
    user: web::ReqData<SessionUser>,
    feed_repository: web::Data<dyn FeedRepository>,
    body: web::Json<CreateFeedBodyData>,
) -> Result<HttpResponse, CreateFeedError> {
    let CreateFeedBodyData {
        name,
        interests,
        context,
        timeframe,
    } = body.into_inner();

    let name = name.trim();
    let interests = normalize_selections(interests);
    if name.is_empty() || interests.is_empty() {
        return Err(CreateFeedError::MissingFields);
    }

    let timeframe = match timeframe {
        Some(label) => label
            .parse::<Timeframe>()
            .map_err(|error| CreateFeedError::InvalidTimeframe(error.to_string()))?,
        None => Timeframe::default(),
    };
    let context = context
        .map(|context| context.trim().to_string())
        .filter(|context| !context.is_empty());

    let feed = feed_repository
        .add(
            NewFeed::builder()
                .user_id(user.id)
                .name(name)
                .interests(interests)
                .context(context)
                .timeframe(timeframe)
                .build(),
        )
        .await?;

    info!(feed_id = feed.id, "Feed created");
    Ok(HttpResponse::Ok().json(json!({ "feed": feed })))
}

#[derive(thiserror::Error)]
pub enum CreateFeedError {
    #[error("Name and interests are required")]
    MissingFields,
    #[error("{0}")]
    InvalidTimeframe(String),
    #[error("Internal server error")]
    RepositoryError(#[from] RepositoryError),
}

impl std::fmt::Debug for CreateFeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CreateFeedError {
    fn status_code(&self) -> StatusCode {
        match self {
            CreateFeedError::MissingFields | CreateFeedError::InvalidTimeframe(_) => {
                StatusCode::BAD_REQUEST
            }
            CreateFeedError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from create_feed controller", skip(self), fields(error = ?self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
