use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

/// A news-like item produced by content acquisition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub description: String,
    pub url: String,
    /// RFC 3339 timestamp as given by the provider, empty when unknown
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub published_at: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub source: String,
}

impl Article {
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.published_at).ok()
    }

    /// Text embedded in the vector index for this article
    pub fn embedding_content(&self) -> String {
        format!("{} - {}", self.title, self.description)
    }
}

/// Sorts articles from the most recent to the oldest.
///
/// Articles without a parsable date go last, keeping their relative order.
pub fn sort_by_most_recent(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
}
