use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::application::dto::{JobDto, NewJobRequest};
use crate::application::errors::UseCaseError;
use crate::application::ports::JobRepository;
use crate::application::validation::{no_job, parse_job_id};
use crate::domain::entities::{Job, NewJob};
use crate::domain::value_objects::Criteria;

/// Use case: Create a job for an existing company
pub struct CreateJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl CreateJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self, request: NewJobRequest) -> Result<JobDto, UseCaseError> {
        let new_job = NewJob::try_from(request)?;
        let job = self.job_repo.insert(&new_job).await?;
        info!(id = %job.id(), company = %job.company_handle(), "Job created");
        Ok(JobDto::from(job))
    }
}

/// Use case: List every job
pub struct ListJobsUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl ListJobsUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self) -> Result<Vec<JobDto>, UseCaseError> {
        let jobs = self.job_repo.find_all().await?;
        Ok(jobs.into_iter().map(JobDto::from).collect())
    }
}

/// Use case: Search jobs by `title`, `minSalary`, `hasEquity`
pub struct SearchJobsUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl SearchJobsUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self, criteria: &Criteria) -> Result<Vec<JobDto>, UseCaseError> {
        let jobs = self.job_repo.find_where(criteria).await?;
        if jobs.is_empty() {
            return Err(UseCaseError::NotFound("No jobs match the criteria".to_string()));
        }
        Ok(jobs.into_iter().map(JobDto::from).collect())
    }
}

/// Use case: Fetch one job
pub struct GetJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl GetJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(&self, id: &str) -> Result<JobDto, UseCaseError> {
        let id = parse_job_id(id)?;
        let job = self
            .job_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| no_job(id))?;
        Ok(JobDto::from(job))
    }
}

/// Use case: Partially update a job's title, salary or equity
pub struct UpdateJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl UpdateJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    pub async fn execute(
        &self,
        id: &str,
        data: &Map<String, Value>,
    ) -> Result<JobDto, UseCaseError> {
        let id = parse_job_id(id)?;
        let patch = Job::parse_patch(data)?;

        let job = self
            .job_repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| no_job(id))?;
        info!(id = %id, fields = patch.changes().len(), "Job updated");
        Ok(JobDto::from(job))
    }
}

/// Use case: Delete a job
pub struct DeleteJobUseCase {
    job_repo: Arc<dyn JobRepository>,
}

impl DeleteJobUseCase {
    pub fn new(job_repo: Arc<dyn JobRepository>) -> Self {
        Self { job_repo }
    }

    /// Returns the id of the deleted job
    pub async fn execute(&self, id: &str) -> Result<i32, UseCaseError> {
        let id = parse_job_id(id)?;
        if !self.job_repo.delete(id).await? {
            return Err(no_job(id));
        }
        info!(id = %id, "Job deleted");
        Ok(id.value())
    }
}
