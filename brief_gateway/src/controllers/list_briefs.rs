use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    domain::entities::session_user::SessionUser,
    ports::{brief_repository::BriefRepository, repository_error::RepositoryError},
};

pub const MAX_LISTED_BRIEFS: i64 = 50;

#[tracing::instrument(name = "List briefs", skip(user, brief_repository), fields(user_id = %user.id))]
pub async fn list_briefs(
    user: web::ReqData<SessionUser>,
    brief_repository: web::Data<dyn BriefRepository>,
) -> Result<HttpResponse, RepositoryError> {
    let briefs = brief_repository
        .list_for_user(user.id, MAX_LISTED_BRIEFS)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "briefs": briefs })))
}
