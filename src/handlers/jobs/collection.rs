use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;

/// GET /jobs - List jobs, optionally filtered by title, minSalary, hasEquity.
/// Pairs keep their order and repeats so the validator can refuse duplicates.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let filter = validation::validate_filter(&params)?;

    let jobs = state.jobs.find_all(&filter).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// POST /jobs - Create a job (admin only)
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload?;
    let new_job = validation::validate_create(payload)?;

    let job = state.jobs.create(&new_job).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}
