use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::gemini_client::GeminiClient;
use crate::{
    domain::entities::{
        article::Article,
        narrative::{Narrative, SynthesisRequest},
        timeframe::window_phrase,
    },
    ports::narrative_synthesizer::{NarrativeSynthesisError, NarrativeSynthesizer},
};

const APP_NAME: &str = "Personalized Morning Brief";
const TARGET_WORDS: usize = 1000;

/// Writes briefs with a Gemini-style model
///
/// Without articles, the model searches the web itself (grounding).
pub struct GeminiNarrativeSynthesizer {
    client: Arc<GeminiClient>,
}

impl GeminiNarrativeSynthesizer {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NarrativeSynthesizer for GeminiNarrativeSynthesizer {
    #[tracing::instrument(
        name = "Synthesizing narrative",
        skip(self, request),
        fields(nb_keywords = request.keywords.len(), nb_articles = request.articles.len())
    )]
    async fn synthesize(
        &self,
        request: SynthesisRequest<'_>,
    ) -> Result<Narrative, NarrativeSynthesisError> {
        let today = Utc::now().date_naive();
        let with_search = request.articles.is_empty();
        let prompt = if with_search {
            grounded_prompt(&request, today)
        } else {
            articles_prompt(&request, today)
        };

        let generation = self
            .client
            .generate(&prompt, with_search)
            .await
            .map_err(|error| NarrativeSynthesisError::ProviderError(error.to_string()))?;

        let text = generation.text.trim();
        if text.is_empty() {
            return Err(NarrativeSynthesisError::EmptyNarrative);
        }

        info!(
            nb_citations = generation.citations.len(),
            nb_chars = text.len(),
            "Narrative generated"
        );
        Ok(Narrative {
            text: text.to_string(),
            summary_id: Uuid::new_v4(),
        })
    }
}

/// Highest-priority instructions block, empty without user context
fn user_context_block(user_context: Option<&str>) -> String {
    match user_context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!(
            r#"
CRITICAL USER OVERRIDE:
The user has provided specific instructions for this brief: "{context}"

YOU MUST PRIORITIZE THIS CONTEXT ABOVE ALL ELSE.
- If this context narrows the scope (e.g. "Focus on VC fundraising"), ONLY report on that, even if it ignores other selected topics.
- If this context sets a tone or specific angle, ADOPT IT.
- Filter all search results through this lens.
"#
        ),
        None => String::new(),
    }
}

fn timeframe_label(request: &SynthesisRequest<'_>) -> &'static str {
    request.timeframe.map(|t| t.as_str()).unwrap_or("unspecified")
}

/// Prompt for a brief where the model finds the news with a web search
pub fn grounded_prompt(request: &SynthesisRequest<'_>, today: NaiveDate) -> String {
    format!(
        r#"You are an elite news anchor and financial analyst. Your goal is to deliver a spoken-word style briefing.

Selected Topics: {topics}.
User's selected timeframe: {label} ({window}).
Current Date: {today}.
{context}
INSTRUCTIONS:
1. Search for the most significant news of the {window} related to the context/topics.
2. STYLE: You are a "News Anchor". Do NOT read off headers like "Headline: ...".
   - Speak naturally, as if you are live on air.
   - Use transitions between stories (e.g., "Turning to the markets...", "In tech news...", "Meanwhile in Washington...").
   - Keep it punchy, professional, and dense with facts, but flow like a conversation.
3. CONTENT:
   - Focus on the FACTS.
   - Explain WHY it matters (implications).
   - Mention sources naturally (e.g., "Bloomberg reports that...").
4. STRUCTURE:
   - Start with a strong hook/summary of the biggest story.
   - Move through 2-3 other key stories.
   - End with a quick forward-looking thought or market check.

REQUIREMENTS:
- NO markdown headers (like ## or ###) that would be read aloud awkwardly.
- NO listicles if possible, or make them sound natural ("There are three key factors here: first...").
- Absolute priority on the USER CONTEXT provided above.
"#,
        topics = request.keywords.join(", "),
        label = timeframe_label(request),
        window = window_phrase(request.timeframe),
        today = today.format("%Y-%m-%d"),
        context = user_context_block(request.user_context),
    )
}

fn format_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|a| {
            format!(
                "- {} - {} (via {}) [{}]",
                a.title, a.description, a.source, a.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for a brief written from already acquired articles
pub fn articles_prompt(request: &SynthesisRequest<'_>, today: NaiveDate) -> String {
    format!(
        r#"You are the host of a concise, engaging audio morning brief called "{APP_NAME}".
Audience: busy professionals on their morning commute.
Goal: a 5-10 minute spoken brief (~{TARGET_WORDS} words), focused, upbeat, and neutral in tone.
Current Date: {today}.
{context}
Guidelines:
- Start with a strong hook summarizing the biggest story and the key themes.
- Move through 2-3 key stories. DO NOT use explicit headers or "Headline:" labels that would be read aloud.
- Use natural transitions between topics.
- Mention sources briefly ("via <Source>"); do not fabricate facts; stay within provided article titles/descriptions.
- Avoid stock tickers unless present; be careful with numbers.
- End with a brief forward-looking outro suggesting what they might watch for today.

Output format:
- Natural spoken prose.
- No markdown headers.

LISTENER INTERESTS:
{interests}

RAG CONTEXT (prior summaries and feedback, most relevant first):
No prior context.

ARTICLES ({window}):
{articles}

Please write ~{TARGET_WORDS} words total.
"#,
        today = today.format("%Y-%m-%d"),
        context = user_context_block(request.user_context),
        interests = request.keywords.join(", "),
        window = window_phrase(request.timeframe),
        articles = format_articles(request.articles),
    )
}
