use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::state::AppState;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Jobly API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "jobs": "/jobs (GET public, POST admin)",
            "job": "/jobs/:id (GET public, PATCH/DELETE admin)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - Report whether the database answers
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(state.jobs.pool()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
