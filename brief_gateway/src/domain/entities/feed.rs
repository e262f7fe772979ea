use chrono::{DateTime, Utc};
use serde::Serialize;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::{interest::InterestSelection, timeframe::Timeframe};

/// A named, reusable interest configuration owned by a user ("channel")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub interests: Vec<InterestSelection>,
    /// Free-text instructions taking precedence over the topics
    pub context: Option<String>,
    pub timeframe: Timeframe,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct NewFeed {
    pub user_id: Uuid,

    #[builder(setter(into))]
    pub name: String,

    pub interests: Vec<InterestSelection>,

    #[builder(default)]
    pub context: Option<String>,

    #[builder(default)]
    pub timeframe: Timeframe,
}
