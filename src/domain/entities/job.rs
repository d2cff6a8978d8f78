use serde_json::{Map, Value};

use crate::domain::entities::Patch;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CompanyHandle, Equity, FieldKind, JobId};

/// Job entity; `id` and `company_handle` are fixed once the job exists
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    id: JobId,
    title: String,
    salary: Option<i32>,
    equity: Option<Equity>,
    company_handle: CompanyHandle,
}

/// A job not yet persisted; the database assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Equity>,
    pub company_handle: CompanyHandle,
}

impl Job {
    pub const UPDATABLE_FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("title", FieldKind::Text),
        ("salary", FieldKind::OptionalCount),
        ("equity", FieldKind::OptionalEquity),
    ];

    pub const IMMUTABLE_FIELDS: &'static [&'static str] = &["id", "companyHandle"];

    pub fn new(
        id: JobId,
        title: String,
        salary: Option<i32>,
        equity: Option<Equity>,
        company_handle: CompanyHandle,
    ) -> Self {
        Self {
            id,
            title,
            salary,
            equity,
            company_handle,
        }
    }

    pub fn from_new(id: JobId, new_job: NewJob) -> Self {
        Self::new(
            id,
            new_job.title,
            new_job.salary,
            new_job.equity,
            new_job.company_handle,
        )
    }

    /// Validate an update payload; only title, salary and equity may change
    pub fn parse_patch(data: &Map<String, Value>) -> Result<Patch, DomainError> {
        Patch::parse(data, Self::UPDATABLE_FIELDS, Self::IMMUTABLE_FIELDS)
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn salary(&self) -> Option<i32> {
        self.salary
    }

    pub fn equity(&self) -> Option<Equity> {
        self.equity
    }

    pub fn company_handle(&self) -> &CompanyHandle {
        &self.company_handle
    }
}
