pub mod create_feed;
pub mod delete_feed;
pub mod generate_brief;
pub mod get_audio;
pub mod get_brief;
pub mod get_profile;
pub mod get_session;
pub mod health_check;
pub mod json_error_handler;
pub mod list_briefs;
pub mod list_feeds;
pub mod list_interests;
pub mod repository_error_response;
pub mod save_profile;
pub mod sign_in_account;
pub mod sign_out_account;
pub mod sign_up_account;
pub mod submit_feedback;

pub use create_feed::*;
pub use delete_feed::*;
pub use generate_brief::*;
pub use get_audio::*;
pub use get_brief::*;
pub use get_profile::*;
pub use get_session::*;
pub use health_check::*;
pub use json_error_handler::*;
pub use list_briefs::*;
pub use list_feeds::*;
pub use list_interests::*;
pub use save_profile::*;
pub use sign_in_account::*;
pub use sign_out_account::*;
pub use sign_up_account::*;
pub use submit_feedback::*;
