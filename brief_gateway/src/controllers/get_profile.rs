use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::entities::{interest::InterestSelection, session_user::SessionUser},
    ports::{profile_repository::ProfileRepository, repository_error::RepositoryError},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub interests: Vec<InterestSelection>,
    pub onboarding_complete: bool,
}

/// Profile of the caller, with defaults until the onboarding saved one
#[tracing::instrument(name = "Get profile", skip(user, profile_repository), fields(user_id = %user.id))]
pub async fn get_profile(
    user: web::ReqData<SessionUser>,
    profile_repository: web::Data<dyn ProfileRepository>,
) -> Result<HttpResponse, RepositoryError> {
    let response = match profile_repository.find_by_user(user.id).await? {
        Some(profile) => ProfileResponse {
            user_id: profile.user_id,
            interests: profile.interests,
            onboarding_complete: profile.onboarding_complete,
        },
        None => ProfileResponse {
            user_id: user.id,
            interests: vec![],
            onboarding_complete: false,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
