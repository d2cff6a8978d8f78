use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::application::dto::{CompanyDetailDto, CompanyDto, CompanyJobDto, NewCompanyRequest};
use crate::application::errors::UseCaseError;
use crate::application::ports::{CompanyRepository, JobRepository};
use crate::application::validation::{no_company, parse_company_handle};
use crate::domain::entities::Company;
use crate::domain::value_objects::Criteria;

/// Use case: Create a company
pub struct CreateCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl CreateCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    /// Reject a taken handle up front; the unique constraint still catches
    /// a concurrent insert of the same handle.
    pub async fn execute(&self, request: NewCompanyRequest) -> Result<CompanyDto, UseCaseError> {
        let company = Company::try_from(request)?;

        if self.company_repo.exists(company.handle()).await? {
            return Err(UseCaseError::Duplicate(format!(
                "Duplicate company: {}",
                company.handle()
            )));
        }

        let created = self.company_repo.insert(&company).await?;
        info!(handle = %created.handle(), "Company created");
        Ok(CompanyDto::from(created))
    }
}

/// Use case: List every company
pub struct ListCompaniesUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl ListCompaniesUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self) -> Result<Vec<CompanyDto>, UseCaseError> {
        let companies = self.company_repo.find_all().await?;
        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }
}

/// Use case: Search companies by `nameLike`, `minEmployees`, `maxEmployees`
pub struct SearchCompaniesUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl SearchCompaniesUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self, criteria: &Criteria) -> Result<Vec<CompanyDto>, UseCaseError> {
        let companies = self.company_repo.find_where(criteria).await?;
        if companies.is_empty() {
            return Err(UseCaseError::NotFound(
                "No companies match the criteria".to_string(),
            ));
        }
        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }
}

/// Use case: Fetch one company with its jobs
pub struct GetCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
    job_repo: Arc<dyn JobRepository>,
}

impl GetCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>, job_repo: Arc<dyn JobRepository>) -> Self {
        Self {
            company_repo,
            job_repo,
        }
    }

    pub async fn execute(&self, handle: &str) -> Result<CompanyDetailDto, UseCaseError> {
        let handle = parse_company_handle(handle)?;
        let company = self
            .company_repo
            .find_by_handle(&handle)
            .await?
            .ok_or_else(|| no_company(&handle))?;
        let jobs = self.job_repo.find_by_company(&handle).await?;

        Ok(CompanyDetailDto {
            company: CompanyDto::from(company),
            jobs: jobs.into_iter().map(CompanyJobDto::from).collect(),
        })
    }
}

/// Use case: Partially update a company
pub struct UpdateCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl UpdateCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(
        &self,
        handle: &str,
        data: &Map<String, Value>,
    ) -> Result<CompanyDto, UseCaseError> {
        let handle = parse_company_handle(handle)?;
        let patch = Company::parse_patch(data)?;

        let updated = self
            .company_repo
            .update(&handle, &patch)
            .await?
            .ok_or_else(|| no_company(&handle))?;
        info!(handle = %handle, fields = patch.changes().len(), "Company updated");
        Ok(CompanyDto::from(updated))
    }
}

/// Use case: Delete a company and, by cascade, its jobs
pub struct DeleteCompanyUseCase {
    company_repo: Arc<dyn CompanyRepository>,
}

impl DeleteCompanyUseCase {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn execute(&self, handle: &str) -> Result<(), UseCaseError> {
        let handle = parse_company_handle(handle)?;
        if !self.company_repo.delete(&handle).await? {
            return Err(no_company(&handle));
        }
        info!(handle = %handle, "Company deleted");
        Ok(())
    }
}
