pub mod article;
pub mod brief;
pub mod embedding;
pub mod feed;
pub mod feedback;
pub mod interest;
pub mod narrative;
pub mod profile;
pub mod session_user;
pub mod timeframe;
pub mod user;
pub mod user_email;
pub mod user_password;
