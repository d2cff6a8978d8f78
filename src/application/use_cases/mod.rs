mod companies;
mod jobs;

pub use companies::{
    CreateCompanyUseCase, DeleteCompanyUseCase, GetCompanyUseCase, ListCompaniesUseCase,
    SearchCompaniesUseCase, UpdateCompanyUseCase,
};
pub use jobs::{
    CreateJobUseCase, DeleteJobUseCase, GetJobUseCase, ListJobsUseCase, SearchJobsUseCase,
    UpdateJobUseCase,
};
