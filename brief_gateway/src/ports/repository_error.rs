use common::helper::error_chain_fmt;

/// Failure of a storage collaborator. Never shown as is to a client.
#[derive(thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
