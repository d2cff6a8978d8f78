use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::application::ports::{CompanyRepository, RepositoryError};
use crate::domain::entities::{Company, Patch};
use crate::domain::value_objects::{CompanyHandle, Criteria};
use crate::infrastructure::persistence::is_unique_violation;
use crate::infrastructure::persistence::query_builder::{
    bind_values, build_filter_clause, build_update_clause, COMPANY_COLUMNS, COMPANY_FILTERS,
};

const COMPANY_FIELDS: &str = "handle, name, description, num_employees, logo_url";

pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn exists(&self, handle: &CompanyHandle) -> Result<bool, RepositoryError> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
                .bind(handle.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    async fn insert(&self, company: &Company) -> Result<Company, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            r#"
            INSERT INTO companies (handle, name, description, num_employees, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMPANY_FIELDS}
            "#
        ))
        .bind(company.handle().as_str())
        .bind(company.name())
        .bind(company.description())
        .bind(company.num_employees())
        .bind(company.logo_url())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::Duplicate(format!("Duplicate company: {}", company.handle()))
            } else {
                RepositoryError::Database(e)
            }
        })?;

        row.into_domain()
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        let rows = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COMPANY_FIELDS} FROM companies ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn find_where(&self, criteria: &Criteria) -> Result<Vec<Company>, RepositoryError> {
        let clause = build_filter_clause(criteria, &COMPANY_FILTERS)?;
        let sql = format!(
            "SELECT {COMPANY_FIELDS} FROM companies WHERE {} ORDER BY name",
            clause.predicates
        );
        debug!(%sql, "Searching companies");

        let rows = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), &clause.values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn find_by_handle(
        &self,
        handle: &CompanyHandle,
    ) -> Result<Option<Company>, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COMPANY_FIELDS} FROM companies WHERE handle = $1"
        ))
        .bind(handle.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_domain()).transpose()
    }

    async fn update(
        &self,
        handle: &CompanyHandle,
        patch: &Patch,
    ) -> Result<Option<Company>, RepositoryError> {
        let clause = build_update_clause(patch.changes(), COMPANY_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_FIELDS}",
            clause.assignments,
            clause.next_placeholder()
        );
        debug!(%sql, "Updating company");

        let row = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), &clause.values)
            .bind(handle.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepositoryError::Duplicate("Duplicate company name".to_string())
                } else {
                    RepositoryError::Database(e)
                }
            })?;

        row.map(|r| r.into_domain()).transpose()
    }

    async fn delete(&self, handle: &CompanyHandle) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct CompanyRow {
    handle: String,
    name: String,
    description: Option<String>,
    num_employees: Option<i32>,
    logo_url: Option<String>,
}

impl CompanyRow {
    fn into_domain(self) -> Result<Company, RepositoryError> {
        let handle = CompanyHandle::new(self.handle)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        Ok(Company::new(
            handle,
            self.name,
            self.description,
            self.num_employees,
            self.logo_url,
        ))
    }
}
