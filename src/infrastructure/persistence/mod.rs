mod postgres_company_repository;
mod postgres_job_repository;
pub mod query_builder;

pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_job_repository::PostgresJobRepository;

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}
