pub mod audio_renderer;
pub mod audio_storage;
pub mod brief_notifier;
pub mod brief_repository;
pub mod content_acquisition;
pub mod embedding_repository;
pub mod feed_repository;
pub mod feedback_repository;
pub mod narrative_synthesizer;
pub mod profile_repository;
pub mod repository_error;
pub mod text_embedder;
pub mod user_repository;
pub mod vector_index;
