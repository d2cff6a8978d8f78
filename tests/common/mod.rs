//! In-memory repositories and router setup shared by the HTTP tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

use jobly::api::create_router;
use jobly::api::middleware::auth::create_token;
use jobly::application::ports::{CompanyRepository, JobRepository, RepositoryError};
use jobly::domain::entities::{Company, Job, NewJob, Patch};
use jobly::domain::value_objects::{CompanyHandle, Criteria, Equity, FieldValue, JobId};
use jobly::infrastructure::persistence::query_builder::{
    build_filter_clause, build_update_clause, COMPANY_COLUMNS, COMPANY_FILTERS, JOB_COLUMNS,
    JOB_FILTERS,
};
use jobly::{ApplicationBuilder, Config};

pub const SECRET: &str = "test-secret";

fn text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(v) => v.clone(),
        _ => None,
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: Mutex<BTreeMap<String, Company>>,
    jobs: Option<Arc<InMemoryJobRepository>>,
}

impl InMemoryCompanyRepository {
    pub fn new(jobs: Arc<InMemoryJobRepository>) -> Self {
        Self {
            companies: Mutex::default(),
            jobs: Some(jobs),
        }
    }

    fn sorted(&self) -> Vec<Company> {
        let mut companies: Vec<Company> = self.companies.lock().unwrap().values().cloned().collect();
        companies.sort_by(|a, b| a.name().cmp(b.name()));
        companies
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn exists(&self, handle: &CompanyHandle) -> Result<bool, RepositoryError> {
        Ok(self.companies.lock().unwrap().contains_key(handle.as_str()))
    }

    async fn insert(&self, company: &Company) -> Result<Company, RepositoryError> {
        let mut companies = self.companies.lock().unwrap();
        if companies.contains_key(company.handle().as_str())
            || companies.values().any(|c| c.name() == company.name())
        {
            return Err(RepositoryError::Duplicate(format!(
                "Duplicate company: {}",
                company.handle()
            )));
        }
        companies.insert(company.handle().to_string(), company.clone());
        Ok(company.clone())
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(self.sorted())
    }

    async fn find_where(&self, criteria: &Criteria) -> Result<Vec<Company>, RepositoryError> {
        build_filter_clause(criteria, &COMPANY_FILTERS)?;

        Ok(self
            .sorted()
            .into_iter()
            .filter(|company| {
                criteria.entries().iter().all(|(key, value)| match key.as_str() {
                    "nameLike" => value
                        .to_text()
                        .is_some_and(|needle| contains(company.name(), &needle)),
                    "minEmployees" => company.num_employees() >= value.read_integer(),
                    "maxEmployees" => company
                        .num_employees()
                        .is_some_and(|n| Some(n) <= value.read_integer()),
                    _ => false,
                })
            })
            .collect())
    }

    async fn find_by_handle(
        &self,
        handle: &CompanyHandle,
    ) -> Result<Option<Company>, RepositoryError> {
        Ok(self.companies.lock().unwrap().get(handle.as_str()).cloned())
    }

    async fn update(
        &self,
        handle: &CompanyHandle,
        patch: &Patch,
    ) -> Result<Option<Company>, RepositoryError> {
        build_update_clause(patch.changes(), COMPANY_COLUMNS)?;

        let mut companies = self.companies.lock().unwrap();
        let Some(current) = companies.get(handle.as_str()) else {
            return Ok(None);
        };

        let updated = Company::new(
            current.handle().clone(),
            patch
                .get("name")
                .and_then(text)
                .unwrap_or_else(|| current.name().to_string()),
            match patch.get("description") {
                Some(v) => text(v),
                None => current.description().map(str::to_string),
            },
            match patch.get("numEmployees") {
                Some(v) => v.as_integer(),
                None => current.num_employees(),
            },
            match patch.get("logoUrl") {
                Some(v) => text(v),
                None => current.logo_url().map(str::to_string),
            },
        );
        companies.insert(handle.to_string(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, handle: &CompanyHandle) -> Result<bool, RepositoryError> {
        let removed = self.companies.lock().unwrap().remove(handle.as_str()).is_some();
        if removed {
            if let Some(jobs) = &self.jobs {
                jobs.remove_company(handle);
            }
        }
        Ok(removed)
    }
}

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: Mutex<BTreeMap<i32, Job>>,
    companies: Mutex<Vec<String>>,
}

impl InMemoryJobRepository {
    /// Record a company handle jobs may reference
    pub fn register_company(&self, handle: &str) {
        self.companies.lock().unwrap().push(handle.to_string());
    }

    fn remove_company(&self, handle: &CompanyHandle) {
        self.companies.lock().unwrap().retain(|h| h != handle.as_str());
        self.jobs
            .lock()
            .unwrap()
            .retain(|_, job| job.company_handle() != handle);
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        if !self
            .companies
            .lock()
            .unwrap()
            .iter()
            .any(|h| h == job.company_handle.as_str())
        {
            return Err(RepositoryError::InvalidInput(format!(
                "No company: {}",
                job.company_handle
            )));
        }
        let mut jobs = self.jobs.lock().unwrap();
        let id = jobs.keys().next_back().copied().unwrap_or(0) + 1;
        let created = Job::from_new(JobId::new(id), job.clone());
        jobs.insert(id, created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.jobs.lock().unwrap().values().cloned().collect())
    }

    async fn find_where(&self, criteria: &Criteria) -> Result<Vec<Job>, RepositoryError> {
        build_filter_clause(criteria, &JOB_FILTERS)?;

        Ok(self
            .jobs
            .lock()
            .unwrap()
            .values()
            .filter(|job| {
                criteria.entries().iter().all(|(key, value)| match key.as_str() {
                    "title" => value
                        .to_text()
                        .is_some_and(|needle| contains(job.title(), &needle)),
                    "minSalary" => job.salary().is_some_and(|s| Some(s) >= value.read_integer()),
                    "hasEquity" => {
                        let positive = job.equity().is_some_and(|e| e.is_positive());
                        value.read_boolean() == Some(positive)
                    }
                    _ => false,
                })
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.lock().unwrap().get(&id.value()).cloned())
    }

    async fn find_by_company(&self, handle: &CompanyHandle) -> Result<Vec<Job>, RepositoryError> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .values()
            .filter(|job| job.company_handle() == handle)
            .cloned()
            .collect())
    }

    async fn update(&self, id: JobId, patch: &Patch) -> Result<Option<Job>, RepositoryError> {
        build_update_clause(patch.changes(), JOB_COLUMNS)?;

        let mut jobs = self.jobs.lock().unwrap();
        let Some(current) = jobs.get(&id.value()) else {
            return Ok(None);
        };

        let equity = match patch.get("equity") {
            Some(FieldValue::Decimal(v)) => v
                .map(Equity::new)
                .transpose()
                .map_err(|e| RepositoryError::InvalidInput(e.to_string()))?,
            _ => current.equity(),
        };
        let updated = Job::new(
            id,
            patch
                .get("title")
                .and_then(text)
                .unwrap_or_else(|| current.title().to_string()),
            match patch.get("salary") {
                Some(v) => v.as_integer(),
                None => current.salary(),
            },
            equity,
            current.company_handle().clone(),
        );
        jobs.insert(id.value(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: JobId) -> Result<bool, RepositoryError> {
        Ok(self.jobs.lock().unwrap().remove(&id.value()).is_some())
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/jobly_test".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        allowed_origins: vec![],
        secret_key: SECRET.to_string(),
        token_ttl_secs: 60,
        db_max_connections: 1,
        db_min_connections: 0,
        db_acquire_timeout_secs: 1,
        db_idle_timeout_secs: 60,
        db_max_lifetime_secs: 60,
    }
}

/// Router over in-memory repositories seeded with companies c1..c3 and
/// four jobs, mirroring the SQL fixture
pub async fn seeded_app() -> Router {
    let jobs = Arc::new(InMemoryJobRepository::default());
    let companies = Arc::new(InMemoryCompanyRepository::new(Arc::clone(&jobs)));

    for n in 1..=3 {
        let handle = format!("c{n}");
        companies
            .insert(&Company::new(
                CompanyHandle::new(handle.clone()).unwrap(),
                format!("C{n}"),
                Some(format!("Desc{n}")),
                Some(n),
                Some(format!("http://c{n}.img")),
            ))
            .await
            .unwrap();
        jobs.register_company(&handle);
    }

    let equity = |raw: &str| Some(Equity::new(raw.parse::<Decimal>().unwrap()).unwrap());
    for (title, salary, equity, handle) in [
        ("Paper Boy", 20000, equity("0.005"), "c1"),
        ("Paper Girl", 30000, equity("0.1"), "c2"),
        ("Paper Man", 10000, equity("0"), "c3"),
        ("Paper Woman", 10000, None, "c1"),
    ] {
        jobs.insert(&NewJob {
            title: title.to_string(),
            salary: Some(salary),
            equity,
            company_handle: CompanyHandle::new(handle.to_string()).unwrap(),
        })
        .await
        .unwrap();
    }

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/jobly_test")
        .unwrap();
    let state = ApplicationBuilder::new(test_config())
        .with_pool(pool)
        .with_repositories(companies, jobs)
        .build()
        .unwrap();

    create_router(state)
}

pub fn admin_token() -> String {
    create_token("admin", true, SECRET, Duration::from_secs(60)).unwrap()
}

pub fn user_token() -> String {
    create_token("u1", false, SECRET, Duration::from_secs(60)).unwrap()
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(data) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&data).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
