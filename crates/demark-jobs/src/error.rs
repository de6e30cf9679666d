//! Error types for job tracking.

use thiserror::Error;

use demark_models::JobId;

/// Result type for job store operations.
pub type JobsResult<T> = Result<T, JobsError>;

/// Errors that can occur in the job store and runner.
#[derive(Debug, Error)]
pub enum JobsError {
    #[error("Unknown job: {0}")]
    UnknownJob(JobId),
}
