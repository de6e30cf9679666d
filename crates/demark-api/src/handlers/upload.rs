//! Multipart video upload.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use demark_models::{allowed_extension, input_file_name, output_file_name, Job, JobId};

use crate::flash::redirect_with_message;
use crate::state::AppState;

/// Handle `POST /upload`.
///
/// Streams the `file` multipart field to
/// `{base}_{job_id}{ext}` under the upload directory, probes the frame
/// dimensions and creates the job record. Validation failures redirect to
/// the index with a message and never create a job.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                return handle_file_field(state, field).await;
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart upload");
                return redirect_with_message("/", "Upload failed").into_response();
            }
        }
    }

    redirect_with_message("/", "No file part").into_response()
}

async fn handle_file_field(
    state: AppState,
    mut field: axum::extract::multipart::Field<'_>,
) -> Response {
    let original_name = field.file_name().unwrap_or_default().to_string();
    if original_name.is_empty() {
        return redirect_with_message("/", "No selected file").into_response();
    }
    if !allowed_extension(&original_name) {
        return redirect_with_message("/", "Invalid file type. Please upload a video file.")
            .into_response();
    }

    let job_id = JobId::new();
    let input_name = input_file_name(&original_name, &job_id);
    let output_name = output_file_name(&original_name, &job_id);
    let input_path = state.config.upload_dir.join(&input_name);

    if let Err(e) = write_field_to_file(&mut field, &input_path).await {
        warn!(error = %e, path = %input_path.display(), "Failed to store upload");
        let _ = tokio::fs::remove_file(&input_path).await;
        return redirect_with_message("/", "Upload failed").into_response();
    }

    // Capture dimensions for the selection preview before creating the job.
    let probe_path = input_path.clone();
    let dimensions =
        tokio::task::spawn_blocking(move || demark_media::probe_dimensions(&probe_path)).await;

    let dimensions = match dimensions {
        Ok(Ok(dims)) => dims,
        Ok(Err(e)) => {
            warn!(error = %e, "Uploaded file is not a readable video");
            let _ = tokio::fs::remove_file(&input_path).await;
            return redirect_with_message("/", "Could not read the uploaded video").into_response();
        }
        Err(e) => {
            warn!(error = %e, "Probe task panicked");
            let _ = tokio::fs::remove_file(&input_path).await;
            return redirect_with_message("/", "Could not read the uploaded video").into_response();
        }
    };

    info!(
        job_id = %job_id,
        input = %input_name,
        dimensions = %dimensions,
        "Upload accepted"
    );

    state
        .store
        .create(Job::new(job_id.clone(), input_name, output_name, dimensions));

    Redirect::to(&format!("/select/{job_id}")).into_response()
}

async fn write_field_to_file(
    field: &mut axum::extract::multipart::Field<'_>,
    path: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}
