//! Shared data models for the Demark watermark removal service.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and the job status state machine
//! - Watermark regions and removal methods
//! - Video dimensions
//! - Storage file naming

pub mod job;
pub mod method;
pub mod naming;
pub mod region;
pub mod video;

// Re-export common types
pub use job::{Job, JobId, JobStatus};
pub use method::{Method, MethodParseError};
pub use naming::{
    allowed_extension, input_file_name, output_file_name, preview_file_name, sanitize_base_name,
    split_file_name, ALLOWED_EXTENSIONS,
};
pub use region::{Region, RegionError};
pub use video::Dimensions;
