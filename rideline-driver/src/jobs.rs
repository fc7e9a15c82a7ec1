use crate::error::AppError;
use crate::service::AcceptError;
use crate::state::AppState;
use axum::{
    extract::{Json, Path, State},
    routing::{get, post},
    Router,
};
use rideline_domain::driver::Driver;
use rideline_domain::job::Job;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers))
        .route("/jobs", get(list_jobs))
        .route("/jobs/{booking_id}/accept", post(accept_job))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AcceptJobRequest {
    driver_id: String,
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    let drivers = state.jobs.list_drivers().await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("failed to list drivers: {e}"))
    })?;
    Ok(Json(drivers))
}

async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state.jobs.list_open_jobs().await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("failed to list jobs: {e}"))
    })?;
    Ok(Json(jobs))
}

async fn accept_job(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<AcceptJobRequest>,
) -> Result<Json<Value>, AppError> {
    if req.driver_id.is_empty() {
        return Err(AppError::Validation("driver_id is required".to_string()));
    }

    match state.jobs.accept_job(booking_id, &req.driver_id).await {
        Ok(()) => Ok(Json(json!({ "status": "accepted" }))),
        Err(AcceptError::DriverNotFound) => {
            Err(AppError::NotFound("driver not found or unavailable".to_string()))
        }
        Err(AcceptError::JobAlreadyTaken) => {
            Err(AppError::Conflict("job already taken".to_string()))
        }
        Err(other) => Err(AppError::Internal(other.into())),
    }
}
