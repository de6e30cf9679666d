//! Job record and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::video::Dimensions;

/// Unique identifier for a processing job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job processing status.
///
/// Legal transitions: `Uploaded -> Processing -> {Completed, Failed}`.
/// `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Video received and stored, waiting for a region selection
    #[default]
    Uploaded,
    /// Background task is transforming frames
    Processing,
    /// Output file written and readable
    Completed,
    /// Processing failed; `error` on the record holds the message
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Uploaded => "uploaded",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A watermark removal job.
///
/// Created on upload and mutated in place through the store by the
/// processing task; never deleted (state is process-lifetime only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Current status
    pub status: JobStatus,

    /// Progress percentage (0-100), non-decreasing while processing
    pub progress: u8,

    /// Input file name, relative to the upload directory
    pub input_file: String,

    /// Output file name, relative to the processed directory
    pub output_file: String,

    /// Preview frame file name, set when the selection page is rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_file: Option<String>,

    /// Creation timestamp
    pub started_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Source frame dimensions, captured at upload time
    pub dimensions: Dimensions,

    /// Error message, present only when status is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    /// Create a new job record in the `Uploaded` state.
    pub fn new(
        id: JobId,
        input_file: impl Into<String>,
        output_file: impl Into<String>,
        dimensions: Dimensions,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Uploaded,
            progress: 0,
            input_file: input_file.into(),
            output_file: output_file.into(),
            preview_file: None,
            started_at: now,
            updated_at: now,
            dimensions,
            error: None,
        }
    }

    /// Transition to `Processing` with progress reset to zero.
    pub fn begin_processing(&mut self) {
        self.status = JobStatus::Processing;
        self.progress = 0;
        self.updated_at = Utc::now();
    }

    /// Update progress. Clamped to 100 and never decreasing, so pollers
    /// always observe a monotone value.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = self.progress.max(progress.min(100));
        self.updated_at = Utc::now();
    }

    /// Mark the job as completed; progress is forced to 100.
    pub fn complete(&mut self) {
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.updated_at = Utc::now();
    }

    /// Mark the job as failed with an error message.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error = Some(error.into());
        self.updated_at = Utc::now();
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
