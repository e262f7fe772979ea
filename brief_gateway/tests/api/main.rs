mod auth;
mod briefs;
mod doubles;
mod feedback;
mod feeds;
mod health_check;
mod helpers;
mod interests;
