use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    domain::entities::{
        interest::{normalize_selections, InterestSelection},
        session_user::SessionUser,
    },
    ports::{profile_repository::ProfileRepository, repository_error::RepositoryError},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveProfileBodyData {
    pub interests: Vec<InterestSelection>,
}

/// Saves the default interests of the caller and completes their onboarding
#[tracing::instrument(name = "Save profile", skip(user, profile_repository, body), fields(user_id = %user.id))]
pub async fn save_profile(
    user: web::ReqData<SessionUser>,
    profile_repository: web::Data<dyn ProfileRepository>,
    body: web::Json<SaveProfileBodyData>,
) -> Result<HttpResponse, RepositoryError> {
    let interests = normalize_selections(body.into_inner().interests);

    profile_repository
        .save_interests(user.id, &interests, &user.email, &user.name)
        .await?;

    info!(nb_interests = interests.len(), "Profile saved");
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
