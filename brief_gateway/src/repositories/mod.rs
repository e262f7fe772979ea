pub mod audio_file_system_storage;
pub mod audio_s3_storage;
pub mod brief_postgres_repository;
pub mod embedding_postgres_repository;
pub mod feed_postgres_repository;
pub mod feedback_postgres_repository;
pub mod profile_postgres_repository;
pub mod session_jwt_repository;
pub mod user_postgres_repository;
