use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Map, Value};

use crate::api::errors::ApiError;
use crate::api::middleware::validation::validate_payload;
use crate::application::dto::NewJobRequest;
use crate::application::use_cases::{
    CreateJobUseCase, DeleteJobUseCase, GetJobUseCase, ListJobsUseCase, SearchJobsUseCase,
    UpdateJobUseCase,
};
use crate::domain::value_objects::Criteria;

/// POST /jobs
pub async fn create_job_handler(
    State(use_case): State<Arc<CreateJobUseCase>>,
    payload: Result<Json<NewJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(request) = payload?;
    validate_payload(&request)?;

    let job = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// GET /jobs
pub async fn list_jobs_handler(
    State(list): State<Arc<ListJobsUseCase>>,
    State(search): State<Arc<SearchJobsUseCase>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let jobs = if params.is_empty() {
        list.execute().await?
    } else {
        search.execute(&Criteria::from_query_pairs(params)).await?
    };
    Ok(Json(json!({ "jobs": jobs })))
}

/// GET /jobs/{id}
pub async fn get_job_handler(
    State(use_case): State<Arc<GetJobUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let job = use_case.execute(&id).await?;
    Ok(Json(json!({ "job": job })))
}

/// PATCH /jobs/{id}
pub async fn update_job_handler(
    State(use_case): State<Arc<UpdateJobUseCase>>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(data) = payload?;
    let job = use_case.execute(&id, &data).await?;
    Ok(Json(json!({ "job": job })))
}

/// DELETE /jobs/{id}
pub async fn delete_job_handler(
    State(use_case): State<Arc<DeleteJobUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = use_case.execute(&id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
