use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::interest::InterestSelection;

/// Default interests and preferences of a user, one per user
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct Profile {
    pub user_id: Uuid,

    /// Cached from the account, used to send the brief by email
    #[builder(default, setter(strip_option))]
    pub email: Option<String>,

    #[builder(default, setter(strip_option))]
    pub name: Option<String>,

    #[builder(default)]
    pub interests: Vec<InterestSelection>,

    #[builder(default)]
    pub onboarding_complete: bool,
}
