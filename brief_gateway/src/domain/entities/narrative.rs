use uuid::Uuid;

use super::{article::Article, timeframe::Timeframe};

/// Everything the narrative synthesis needs for one brief
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub keywords: &'a [String],
    /// Empty when the synthesizer has to find the news itself
    pub articles: &'a [Article],
    /// `None` is described as a "recent" window
    pub timeframe: Option<Timeframe>,
    /// Highest-priority instructions from the user
    pub user_context: Option<&'a str>,
}

/// Spoken-style text of a brief
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub text: String,
    /// Correlation tag for the vector index, not a brief key
    pub summary_id: Uuid,
}
