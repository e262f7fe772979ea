use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    domain::entities::session_user::SessionUser,
    ports::{feed_repository::FeedRepository, repository_error::RepositoryError},
};

#[tracing::instrument(name = "List feeds", skip(user, feed_repository), fields(user_id = %user.id))]
pub async fn list_feeds(
    user: web::ReqData<SessionUser>,
    feed_repository: web::Data<dyn FeedRepository>,
) -> Result<HttpResponse, RepositoryError> {
    let feeds = feed_repository.list_for_user(user.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "feeds": feeds })))
}
