use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Lifecycle of a brief.
///
/// Generation is synchronous: a row is only written once the audio exists,
/// so only `Completed` is written today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "brief_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BriefStatus {
    Pending,
    Generating,
    Completed,
    Failed,
}

/// One persisted generation: narrative and audio for a user on a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub id: i64,
    pub user_id: Uuid,
    /// `None` when generated from the profile interests
    pub feed_id: Option<i64>,
    /// `YYYY-MM-DD`, not unique per user
    pub date: NaiveDate,
    pub transcript: String,
    pub audio_url: String,
    pub status: BriefStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct NewBrief {
    pub user_id: Uuid,

    #[builder(default)]
    pub feed_id: Option<i64>,

    /// UTC calendar date at generation time
    #[builder(default = Utc::now().date_naive())]
    pub date: NaiveDate,

    pub transcript: String,

    pub audio_url: String,

    #[builder(default = BriefStatus::Completed)]
    pub status: BriefStatus,
}
