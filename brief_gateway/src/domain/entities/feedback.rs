use uuid::Uuid;

/// A user's opinion on one of their briefs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub user_id: Uuid,
    pub brief_id: i64,
    pub rating: Option<i16>,
    pub likes: String,
    pub dislikes: String,
}

impl NewFeedback {
    pub fn try_new(
        user_id: Uuid,
        brief_id: i64,
        rating: Option<i16>,
        likes: Option<String>,
        dislikes: Option<String>,
    ) -> Result<Self, FeedbackError> {
        if let Some(rating) = rating {
            if !(1..=5).contains(&rating) {
                return Err(FeedbackError::InvalidRating(rating));
            }
        }

        let likes = likes.unwrap_or_default().trim().to_string();
        let dislikes = dislikes.unwrap_or_default().trim().to_string();

        if rating.is_none() && likes.is_empty() && dislikes.is_empty() {
            return Err(FeedbackError::Empty);
        }

        Ok(Self {
            user_id,
            brief_id,
            rating,
            likes,
            dislikes,
        })
    }

    /// Texts worth embedding so future briefs can take the feedback into account
    pub fn embedding_contents(&self) -> Vec<String> {
        let mut contents = vec![];
        if !self.likes.is_empty() {
            contents.push(format!("USER_FEEDBACK_LIKES: {}", self.likes));
        }
        if !self.dislikes.is_empty() {
            contents.push(format!("USER_FEEDBACK_DISLIKES: {}", self.dislikes));
        }
        contents
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i16),
    #[error("Feedback needs a rating, likes or dislikes")]
    Empty,
}
