use async_trait::async_trait;
use uuid::Uuid;

use super::repository_error::RepositoryError;
use crate::domain::entities::{interest::InterestSelection, profile::Profile};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, RepositoryError>;

    /// Creates the profile on first save, replaces its interests afterwards.
    ///
    /// Saving always marks the onboarding as complete. `email` and `name` refresh the cached
    /// account details.
    async fn save_interests(
        &self,
        user_id: Uuid,
        interests: &[InterestSelection],
        email: &str,
        name: &str,
    ) -> Result<(), RepositoryError>;
}
