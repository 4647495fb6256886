use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;

/// GET /jobs/:id - Get a single job
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let job = state.jobs.get(id).await?;
    Ok(Json(json!({ "job": job })))
}

/// PATCH /jobs/:id - Merge title, salary, and/or equity into a job (admin only)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let patch = validation::validate_update(payload)?;

    let job = state.jobs.update(id, &patch).await?;
    Ok(Json(json!({ "job": job })))
}

/// DELETE /jobs/:id - Remove a job (admin only)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    state.jobs.remove(id).await?;
    Ok(Json(json!({ "deleted": id.to_string() })))
}

/// Ids are integers; anything else cannot name a job.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(format!("No job: {}", raw)))
}
