//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

use demark_models::RegionError;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during video decode, transform or encode.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Could not open video file: {0}")]
    OpenFailed(PathBuf),

    #[error("Could not create output video: {0}")]
    EncoderFailed(PathBuf),

    #[error("Video contains no readable frames: {0}")]
    EmptyVideo(PathBuf),

    #[error("Could not write image: {0}")]
    ImageWriteFailed(PathBuf),

    #[error("Non-UTF-8 path: {0}")]
    InvalidPath(PathBuf),

    #[error(transparent)]
    InvalidRegion(#[from] RegionError),

    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create an open failure error.
    pub fn open_failed(path: impl Into<PathBuf>) -> Self {
        Self::OpenFailed(path.into())
    }

    /// Create an encoder failure error.
    pub fn encoder_failed(path: impl Into<PathBuf>) -> Self {
        Self::EncoderFailed(path.into())
    }
}
