//! Processed video download.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, Request};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use demark_models::{JobId, JobStatus};

use crate::flash::redirect_with_message;
use crate::state::AppState;

/// Handle `GET /download/:job_id`.
///
/// Serves the processed file as an attachment. Anything other than a
/// completed job redirects back to the index; the file may also already
/// be gone once cleanup has run.
pub async fn download(State(state): State<AppState>, Path(job_id): Path<String>) -> Response {
    let id = JobId::from_string(job_id);
    let job = match state.store.get(&id) {
        Some(job) if job.status == JobStatus::Completed => job,
        _ => {
            return redirect_with_message("/", "File not ready or invalid job ID").into_response();
        }
    };

    let path = state.config.processed_dir.join(&job.output_file);
    if !path.is_file() {
        return redirect_with_message("/", "File not ready or invalid job ID").into_response();
    }

    let served = ServeFile::new(&path)
        .oneshot(Request::builder().body(Body::empty()).unwrap_or_default())
        .await;

    match served {
        Ok(mut response) => {
            let disposition = format!("attachment; filename=\"{}\"", job.output_file);
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                response
                    .headers_mut()
                    .insert(header::CONTENT_DISPOSITION, value);
            }
            response.map(Body::new)
        }
        Err(e) => {
            warn!(job_id = %id, error = %e, "Failed to serve processed file");
            redirect_with_message("/", "File not ready or invalid job ID").into_response()
        }
    }
}
