use async_trait::async_trait;

use crate::application::ports::RepositoryError;
use crate::domain::entities::{Job, NewJob, Patch};
use crate::domain::value_objects::{CompanyHandle, Criteria, JobId};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for job persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job; an unknown company fails with `InvalidInput`
    async fn insert(&self, job: &NewJob) -> Result<Job, RepositoryError>;

    /// All jobs ordered by id
    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError>;

    async fn find_where(&self, criteria: &Criteria) -> Result<Vec<Job>, RepositoryError>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Jobs posted by one company, ordered by id
    async fn find_by_company(&self, handle: &CompanyHandle) -> Result<Vec<Job>, RepositoryError>;

    async fn update(&self, id: JobId, patch: &Patch) -> Result<Option<Job>, RepositoryError>;

    async fn delete(&self, id: JobId) -> Result<bool, RepositoryError>;
}
