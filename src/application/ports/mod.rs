mod company_repository;
mod job_repository;
mod repository_error;

pub use company_repository::CompanyRepository;
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;

#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;
