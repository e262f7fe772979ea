use async_trait::async_trait;

use crate::domain::entities::article::Article;

/// Finds news items for keywords over a time window.
///
/// Acquisition never fails: provider errors are logged and degrade to fewer (or zero) items.
/// At most `max_items` are returned, without duplicated URL.
#[async_trait]
pub trait ContentAcquisition: Send + Sync {
    async fn fetch_content(
        &self,
        keywords: &[String],
        window_hours: u32,
        max_items: usize,
    ) -> Vec<Article>;
}
