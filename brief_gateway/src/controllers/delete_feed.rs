use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::{
    domain::entities::session_user::SessionUser,
    ports::{feed_repository::FeedRepository, repository_error::RepositoryError},
};

/// Idempotent: a missing feed or a feed of another user is a successful no-op
#[tracing::instrument(name = "Delete feed", skip(user, feed_repository), fields(user_id = %user.id))]
pub async fn delete_feed(
    user: web::ReqData<SessionUser>,
    feed_repository: web::Data<dyn FeedRepository>,
    feed_id: web::Path<i64>,
) -> Result<HttpResponse, RepositoryError> {
    let deleted = feed_repository
        .delete_owned(feed_id.into_inner(), user.id)
        .await?;
    info!(deleted, "Feed deletion handled");

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
