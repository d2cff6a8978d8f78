use async_trait::async_trait;

use crate::application::ports::RepositoryError;
use crate::domain::entities::{Company, Patch};
use crate::domain::value_objects::{CompanyHandle, Criteria};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for company persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn exists(&self, handle: &CompanyHandle) -> Result<bool, RepositoryError>;

    /// Insert a company; a handle or name collision fails with `Duplicate`
    async fn insert(&self, company: &Company) -> Result<Company, RepositoryError>;

    /// All companies ordered by name
    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError>;

    /// Companies matching every criterion, ordered by name
    async fn find_where(&self, criteria: &Criteria) -> Result<Vec<Company>, RepositoryError>;

    async fn find_by_handle(
        &self,
        handle: &CompanyHandle,
    ) -> Result<Option<Company>, RepositoryError>;

    /// Apply a partial update; `None` when no company has this handle
    async fn update(
        &self,
        handle: &CompanyHandle,
        patch: &Patch,
    ) -> Result<Option<Company>, RepositoryError>;

    /// Returns whether a row was removed
    async fn delete(&self, handle: &CompanyHandle) -> Result<bool, RepositoryError>;
}
