//! Start watermark removal for an uploaded job.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{debug, info};

use demark_jobs::ProcessRequest;
use demark_models::{preview_file_name, JobId, Method, Region};

use crate::flash::redirect_with_message;
use crate::state::AppState;

/// Region-selection form. Coordinates are accepted as-is and validated
/// against the video bounds by the processing pass, so a bad rectangle
/// fails the job rather than the request.
#[derive(Debug, Deserialize)]
pub struct ProcessForm {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub method: Option<String>,
}

/// Handle `POST /process/:job_id`.
pub async fn process_video(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    form: Result<Form<ProcessForm>, FormRejection>,
) -> Response {
    let id = JobId::from_string(job_id);
    let Some(job) = state.store.get(&id) else {
        return redirect_with_message("/", "Invalid job ID").into_response();
    };

    let select_path = format!("/select/{id}");
    let Ok(Form(form)) = form else {
        return redirect_with_message(&select_path, "Invalid coordinates").into_response();
    };

    let method = match form.method.as_deref() {
        None | Some("") => Method::default(),
        Some(name) => match name.parse::<Method>() {
            Ok(method) => method,
            Err(e) => {
                return redirect_with_message(&select_path, &e.to_string()).into_response();
            }
        },
    };

    let region = Region::new(form.x, form.y, form.width, form.height);
    let preview_name = job
        .preview_file
        .clone()
        .unwrap_or_else(|| preview_file_name(&id));
    let request = ProcessRequest {
        job_id: id.clone(),
        input_path: state.config.upload_dir.join(&job.input_file),
        output_path: state.config.processed_dir.join(&job.output_file),
        preview_path: Some(state.config.upload_dir.join(preview_name)),
        region,
        method,
    };

    // The runner claims the job under the store lock, so a resubmitted
    // form lands on the status page without restarting a running or
    // finished job.
    match state.runner.spawn(request) {
        Some(_) => {
            info!(job_id = %id, region = %region, method = method.as_str(), "Processing started");
        }
        None => debug!(job_id = %id, "Job already started"),
    }

    Redirect::to(&format!("/status/{id}")).into_response()
}
