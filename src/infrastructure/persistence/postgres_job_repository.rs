use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::entities::{Job, NewJob, Patch};
use crate::domain::value_objects::{CompanyHandle, Criteria, Equity, JobId};
use crate::infrastructure::persistence::is_foreign_key_violation;
use crate::infrastructure::persistence::query_builder::{
    bind_values, build_filter_clause, build_update_clause, JOB_COLUMNS, JOB_FILTERS,
};

const JOB_FIELDS: &str = "id, title, salary, equity, company_handle";

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn insert(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_FIELDS}
            "#
        ))
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity.map(|e| e.as_decimal()))
        .bind(job.company_handle.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                RepositoryError::InvalidInput(format!("No company: {}", job.company_handle))
            } else {
                RepositoryError::Database(e)
            }
        })?;

        row.into_domain()
    }

    async fn find_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_FIELDS} FROM jobs ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn find_where(&self, criteria: &Criteria) -> Result<Vec<Job>, RepositoryError> {
        let clause = build_filter_clause(criteria, &JOB_FILTERS)?;
        let sql = format!(
            "SELECT {JOB_FIELDS} FROM jobs WHERE {} ORDER BY id",
            clause.predicates
        );
        debug!(%sql, "Searching jobs");

        let rows = bind_values(sqlx::query_as::<_, JobRow>(&sql), &clause.values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_FIELDS} FROM jobs WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_domain()).transpose()
    }

    async fn find_by_company(&self, handle: &CompanyHandle) -> Result<Vec<Job>, RepositoryError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_FIELDS} FROM jobs WHERE company_handle = $1 ORDER BY id"
        ))
        .bind(handle.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn update(&self, id: JobId, patch: &Patch) -> Result<Option<Job>, RepositoryError> {
        let clause = build_update_clause(patch.changes(), JOB_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_FIELDS}",
            clause.assignments,
            clause.next_placeholder()
        );
        debug!(%sql, "Updating job");

        let row = bind_values(sqlx::query_as::<_, JobRow>(&sql), &clause.values)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_domain()).transpose()
    }

    async fn delete(&self, id: JobId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i32,
    title: String,
    salary: Option<i32>,
    equity: Option<Decimal>,
    company_handle: String,
}

impl JobRow {
    fn into_domain(self) -> Result<Job, RepositoryError> {
        let equity = self
            .equity
            .map(Equity::new)
            .transpose()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let company_handle = CompanyHandle::new(self.company_handle)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(Job::new(
            JobId::new(self.id),
            self.title,
            self.salary,
            equity,
            company_handle,
        ))
    }
}
