//! Job status endpoint.

use axum::extract::{Path, State};
use axum::Json;

use demark_models::{Job, JobId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handle `GET /api/status/:job_id`.
///
/// Returns the full job record, which the status page polls for
/// progress and terminal state.
pub async fn api_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = JobId::from_string(job_id);
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Invalid job ID"))
}
