use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Map, Value};

use crate::api::errors::ApiError;
use crate::api::middleware::validation::validate_payload;
use crate::application::dto::NewCompanyRequest;
use crate::application::use_cases::{
    CreateCompanyUseCase, DeleteCompanyUseCase, GetCompanyUseCase, ListCompaniesUseCase,
    SearchCompaniesUseCase, UpdateCompanyUseCase,
};
use crate::domain::value_objects::Criteria;

/// POST /companies
pub async fn create_company_handler(
    State(use_case): State<Arc<CreateCompanyUseCase>>,
    payload: Result<Json<NewCompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(request) = payload?;
    validate_payload(&request)?;

    let company = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// GET /companies
///
/// Without query parameters every company is listed; otherwise the
/// parameters are search filters.
pub async fn list_companies_handler(
    State(list): State<Arc<ListCompaniesUseCase>>,
    State(search): State<Arc<SearchCompaniesUseCase>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let companies = if params.is_empty() {
        list.execute().await?
    } else {
        search.execute(&Criteria::from_query_pairs(params)).await?
    };
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/{handle}
pub async fn get_company_handler(
    State(use_case): State<Arc<GetCompanyUseCase>>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let company = use_case.execute(&handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// PATCH /companies/{handle}
pub async fn update_company_handler(
    State(use_case): State<Arc<UpdateCompanyUseCase>>,
    Path(handle): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(data) = payload?;
    let company = use_case.execute(&handle, &data).await?;
    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/{handle}
pub async fn delete_company_handler(
    State(use_case): State<Arc<DeleteCompanyUseCase>>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
    use_case.execute(&handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}
