use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    entities::{Company, Job, NewJob},
    errors::DomainError,
    value_objects::{CompanyHandle, Equity},
};

/// DTO for company responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            handle: company.handle().to_string(),
            name: company.name().to_string(),
            description: company.description().map(str::to_string),
            num_employees: company.num_employees(),
            logo_url: company.logo_url().map(str::to_string),
        }
    }
}

/// A job as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyJobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Equity>,
}

impl From<Job> for CompanyJobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id().value(),
            title: job.title().to_string(),
            salary: job.salary(),
            equity: job.equity(),
        }
    }
}

/// Company with the jobs it has posted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetailDto {
    #[serde(flatten)]
    pub company: CompanyDto,
    pub jobs: Vec<CompanyJobDto>,
}

/// DTO for job responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Equity>,
    pub company_handle: String,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id().value(),
            title: job.title().to_string(),
            salary: job.salary(),
            equity: job.equity(),
            company_handle: job.company_handle().to_string(),
        }
    }
}

/// Payload for creating a company
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompanyRequest {
    #[validate(length(min = 1, max = 25, message = "handle must be 1-25 characters"))]
    pub handle: String,

    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "numEmployees cannot be negative"))]
    pub num_employees: Option<i32>,

    #[validate(url(message = "logoUrl must be a URL"))]
    pub logo_url: Option<String>,
}

impl TryFrom<NewCompanyRequest> for Company {
    type Error = DomainError;

    fn try_from(request: NewCompanyRequest) -> Result<Self, Self::Error> {
        Ok(Company::new(
            CompanyHandle::new(request.handle)?,
            request.name,
            request.description,
            request.num_employees,
            request.logo_url,
        ))
    }
}

/// Payload for creating a job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJobRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,

    #[validate(range(min = 0, message = "salary cannot be negative"))]
    pub salary: Option<i32>,

    pub equity: Option<Decimal>,

    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1-25 characters"))]
    pub company_handle: String,
}

impl TryFrom<NewJobRequest> for NewJob {
    type Error = DomainError;

    fn try_from(request: NewJobRequest) -> Result<Self, Self::Error> {
        Ok(NewJob {
            title: request.title,
            salary: request.salary,
            equity: request.equity.map(Equity::new).transpose()?,
            company_handle: CompanyHandle::new(request.company_handle)?,
        })
    }
}
