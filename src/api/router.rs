use axum::{
    extract::FromRef,
    http::header::AUTHORIZATION,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

use crate::api::handlers::{
    create_company_handler, create_job_handler, delete_company_handler, delete_job_handler,
    get_company_handler, get_job_handler, health_handler, list_companies_handler,
    list_jobs_handler, readiness_handler, update_company_handler, update_job_handler,
};
use crate::api::middleware::{
    auth::{authenticate_jwt, TokenVerifier},
    authorization::ensure_admin,
    cors::create_cors_layer,
    metrics::metrics_middleware,
};
use crate::application::use_cases::{
    CreateCompanyUseCase, CreateJobUseCase, DeleteCompanyUseCase, DeleteJobUseCase,
    GetCompanyUseCase, GetJobUseCase, ListCompaniesUseCase, ListJobsUseCase,
    SearchCompaniesUseCase, SearchJobsUseCase, UpdateCompanyUseCase, UpdateJobUseCase,
};

/// Application state container; handlers extract the piece they need
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub token_verifier: TokenVerifier,
    pub allowed_origins: Arc<Vec<String>>,
    pub create_company_use_case: Arc<CreateCompanyUseCase>,
    pub list_companies_use_case: Arc<ListCompaniesUseCase>,
    pub search_companies_use_case: Arc<SearchCompaniesUseCase>,
    pub get_company_use_case: Arc<GetCompanyUseCase>,
    pub update_company_use_case: Arc<UpdateCompanyUseCase>,
    pub delete_company_use_case: Arc<DeleteCompanyUseCase>,
    pub create_job_use_case: Arc<CreateJobUseCase>,
    pub list_jobs_use_case: Arc<ListJobsUseCase>,
    pub search_jobs_use_case: Arc<SearchJobsUseCase>,
    pub get_job_use_case: Arc<GetJobUseCase>,
    pub update_job_use_case: Arc<UpdateJobUseCase>,
    pub delete_job_use_case: Arc<DeleteJobUseCase>,
}

/// Create router with all routes and middleware.
///
/// Reads are public; creating, updating and deleting companies or jobs
/// requires an admin token. Per-user routes, once mounted under
/// `/users/{username}`, take `ensure_logged_in` or `ensure_current_or_admin`
/// as their `route_layer` the same way the admin routes take `ensure_admin`.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/companies", get(list_companies_handler))
        .route("/companies/{handle}", get(get_company_handler))
        .route("/jobs", get(list_jobs_handler))
        .route("/jobs/{id}", get(get_job_handler));

    let admin = Router::new()
        .route("/companies", post(create_company_handler))
        .route(
            "/companies/{handle}",
            patch(update_company_handler).delete(delete_company_handler),
        )
        .route("/jobs", post(create_job_handler))
        .route(
            "/jobs/{id}",
            patch(update_job_handler).delete(delete_job_handler),
        )
        .route_layer(axum_middleware::from_fn(ensure_admin));

    let cors = create_cors_layer(&state.allowed_origins);

    public
        .merge(admin)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            authenticate_jwt,
        ))
        .layer(axum_middleware::from_fn(metrics_middleware))
        .layer(cors)
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .with_state(state)
}
