use async_trait::async_trait;
use std::{collections::HashSet, sync::Arc};
use tracing::{error, info, warn};

use super::gemini_client::{Generation, GeminiClient};
use crate::{
    domain::{
        entities::article::{sort_by_most_recent, Article},
        services::helpers::extract_json_array,
    },
    ports::content_acquisition::ContentAcquisition,
};

/// Acquires news by asking a search-grounded model to list articles as JSON
pub struct GroundedSearchContentAcquisition {
    client: Arc<GeminiClient>,
}

impl GroundedSearchContentAcquisition {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

fn search_prompt(keywords: &[String], window_hours: u32, max_items: usize) -> String {
    format!(
        r#"Search the web for the most significant news articles published in the last {window_hours} hours about: {topics}.

Return ONLY a JSON array of at most {max_items} items, without any other text. Each item must have this shape:
{{"title": string, "description": string, "url": string, "publishedAt": RFC 3339 date string, "source": string}}

Only include articles you found with the search, with their real URL."#,
        topics = keywords.join(", "),
    )
}

/// Reads articles from a model answer.
///
/// Items of the first JSON array of the text are converted one by one, invalid ones are
/// skipped. When no item is usable, the grounding citations become minimal articles.
pub fn articles_from_generation(generation: &Generation, max_items: usize) -> Vec<Article> {
    let parsed: Vec<Article> = extract_json_array(&generation.text)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Article>(item) {
            Ok(article) => Some(article),
            Err(error) => {
                warn!(%error, "Skipping invalid article of the grounded search answer");
                None
            }
        })
        .collect();

    let articles = if parsed.is_empty() {
        generation
            .citations
            .iter()
            .map(|citation| {
                let title = citation
                    .title
                    .clone()
                    .filter(|title| !title.trim().is_empty());
                Article {
                    title: title.clone().unwrap_or_else(|| citation.uri.clone()),
                    description: String::new(),
                    url: citation.uri.clone(),
                    published_at: String::new(),
                    source: title.unwrap_or_default(),
                }
            })
            .collect()
    } else {
        parsed
    };

    let mut seen_urls = HashSet::new();
    let mut unique: Vec<Article> = articles
        .into_iter()
        .filter(|article| !article.url.is_empty() && seen_urls.insert(article.url.clone()))
        .collect();

    sort_by_most_recent(&mut unique);
    unique.truncate(max_items);
    unique
}

#[async_trait]
impl ContentAcquisition for GroundedSearchContentAcquisition {
    #[tracing::instrument(name = "Acquiring content with grounded search", skip(self, keywords), fields(nb_keywords = keywords.len()))]
    async fn fetch_content(
        &self,
        keywords: &[String],
        window_hours: u32,
        max_items: usize,
    ) -> Vec<Article> {
        if keywords.is_empty() {
            return vec![];
        }

        let prompt = search_prompt(keywords, window_hours, max_items);
        let generation = match self.client.generate(&prompt, true).await {
            Ok(generation) => generation,
            Err(error) => {
                error!(?error, "Grounded search failed");
                return vec![];
            }
        };

        let articles = articles_from_generation(&generation, max_items);
        info!(nb_articles = articles.len(), "Grounded search done");
        articles
    }
}
