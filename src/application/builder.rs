use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::api::middleware::auth::TokenVerifier;
use crate::api::router::AppState;
use crate::application::{
    ports::{CompanyRepository, JobRepository},
    use_cases::{
        CreateCompanyUseCase, CreateJobUseCase, DeleteCompanyUseCase, DeleteJobUseCase,
        GetCompanyUseCase, GetJobUseCase, ListCompaniesUseCase, ListJobsUseCase,
        SearchCompaniesUseCase, SearchJobsUseCase, UpdateCompanyUseCase, UpdateJobUseCase,
    },
};
use crate::config::Config;
use crate::infrastructure::persistence::{PostgresCompanyRepository, PostgresJobRepository};

/// Application builder for dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<PgPool>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    job_repo: Option<Arc<dyn JobRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            company_repo: None,
            job_repo: None,
        }
    }

    /// Initialize database connection pool with retry logic, then migrate
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to database");

        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Use an existing pool, e.g. one prepared by a test harness
    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Wire the Postgres repositories
    pub fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;

        self.company_repo = Some(Arc::new(PostgresCompanyRepository::new(pool.clone())));
        self.job_repo = Some(Arc::new(PostgresJobRepository::new(pool.clone())));

        info!("Infrastructure layer initialized");
        Ok(self)
    }

    /// Override the repositories, e.g. with in-memory doubles
    pub fn with_repositories(
        mut self,
        company_repo: Arc<dyn CompanyRepository>,
        job_repo: Arc<dyn JobRepository>,
    ) -> Self {
        self.company_repo = Some(company_repo);
        self.job_repo = Some(job_repo);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let pool = self.pool.ok_or("Database pool not initialized")?;
        let company_repo = self
            .company_repo
            .ok_or("Company repository not initialized")?;
        let job_repo = self.job_repo.ok_or("Job repository not initialized")?;

        let app_state = AppState {
            pool: Arc::new(pool),
            token_verifier: TokenVerifier::new(&self.config.secret_key),
            allowed_origins: Arc::new(self.config.allowed_origins.clone()),
            create_company_use_case: Arc::new(CreateCompanyUseCase::new(Arc::clone(&company_repo))),
            list_companies_use_case: Arc::new(ListCompaniesUseCase::new(Arc::clone(&company_repo))),
            search_companies_use_case: Arc::new(SearchCompaniesUseCase::new(Arc::clone(
                &company_repo,
            ))),
            get_company_use_case: Arc::new(GetCompanyUseCase::new(
                Arc::clone(&company_repo),
                Arc::clone(&job_repo),
            )),
            update_company_use_case: Arc::new(UpdateCompanyUseCase::new(Arc::clone(&company_repo))),
            delete_company_use_case: Arc::new(DeleteCompanyUseCase::new(company_repo)),
            create_job_use_case: Arc::new(CreateJobUseCase::new(Arc::clone(&job_repo))),
            list_jobs_use_case: Arc::new(ListJobsUseCase::new(Arc::clone(&job_repo))),
            search_jobs_use_case: Arc::new(SearchJobsUseCase::new(Arc::clone(&job_repo))),
            get_job_use_case: Arc::new(GetJobUseCase::new(Arc::clone(&job_repo))),
            update_job_use_case: Arc::new(UpdateJobUseCase::new(Arc::clone(&job_repo))),
            delete_job_use_case: Arc::new(DeleteJobUseCase::new(job_repo)),
        };

        info!("Application layer initialized");
        Ok(app_state)
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
