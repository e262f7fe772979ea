use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::{collections::HashSet, time::Duration as StdDuration};
use tracing::{error, info, warn};

use crate::{
    configuration::NewsApiSettings,
    domain::entities::article::{sort_by_most_recent, Article},
    ports::content_acquisition::ContentAcquisition,
};

const PAGE_SIZE: &str = "100";

/// Acquires news from a NewsAPI-style search endpoint, one request per keyword
pub struct NewsApiContentAcquisition {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

impl NewsApiContentAcquisition {
    pub fn try_new(settings: &NewsApiSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(settings.timeout_s))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    #[tracing::instrument(name = "Searching NewsAPI", skip(self, from))]
    async fn search(&self, keyword: &str, from: &str) -> Result<Option<NewsApiResponse>, reqwest::Error> {
        let response = self
            .http_client
            .get(&self.base_url)
            .header("X-Api-Key", self.api_key.expose_secret())
            .query(&[
                ("q", keyword),
                ("from", from),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", PAGE_SIZE),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(keyword, "NewsAPI rate limit reached, keyword skipped");
            return Ok(None);
        }

        let response = response.error_for_status()?;
        Ok(Some(response.json().await?))
    }
}

/// Adds the articles of a response, skipping the URLs already in `seen_urls`
pub fn merge_unique(
    articles: &mut Vec<Article>,
    seen_urls: &mut HashSet<String>,
    response: NewsApiResponse,
) {
    for article in response.articles {
        let Some(url) = article.url.filter(|url| !url.is_empty()) else {
            continue;
        };
        if !seen_urls.insert(url.clone()) {
            continue;
        }

        articles.push(Article {
            title: article.title.unwrap_or_default().trim().to_string(),
            description: article.description.unwrap_or_default().trim().to_string(),
            url,
            published_at: article.published_at.unwrap_or_default(),
            source: article.source.and_then(|s| s.name).unwrap_or_default(),
        });
    }
}

#[async_trait]
impl ContentAcquisition for NewsApiContentAcquisition {
    #[tracing::instrument(name = "Acquiring content from NewsAPI", skip(self, keywords), fields(nb_keywords = keywords.len()))]
    async fn fetch_content(
        &self,
        keywords: &[String],
        window_hours: u32,
        max_items: usize,
    ) -> Vec<Article> {
        if self.api_key.expose_secret().is_empty() {
            warn!("No NewsAPI key configured, no article acquired");
            return vec![];
        }

        let from = (Utc::now() - Duration::hours(window_hours as i64))
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut articles: Vec<Article> = vec![];
        let mut seen_urls = HashSet::new();

        for keyword in keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
            match self.search(keyword, &from).await {
                Ok(Some(response)) => merge_unique(&mut articles, &mut seen_urls, response),
                Ok(None) => {}
                Err(error) => error!(?error, keyword, "NewsAPI search failed, keyword skipped"),
            }
        }

        sort_by_most_recent(&mut articles);
        articles.truncate(max_items);

        info!(nb_articles = articles.len(), "NewsAPI acquisition done");
        articles
    }
}
