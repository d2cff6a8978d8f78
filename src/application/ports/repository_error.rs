use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A statement could not be built from the caller's input, or the input
    /// breaks a reference constraint
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
