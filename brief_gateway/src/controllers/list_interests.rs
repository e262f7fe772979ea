use actix_web::HttpResponse;
use serde_json::json;

use crate::domain::services::interest_catalog::INTEREST_CATEGORIES;

/// Public catalog of topics offered during onboarding and feed creation
#[tracing::instrument(name = "List interest catalog")]
pub async fn list_interests() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "categories": INTEREST_CATEGORIES }))
}
