//! Error type shared by the company and job use cases

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidInput(msg) => Self::InvalidInput(msg),
            RepositoryError::Duplicate(msg) => Self::Duplicate(msg),
            other => Self::Repository(other),
        }
    }
}

impl From<DomainError> for UseCaseError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
