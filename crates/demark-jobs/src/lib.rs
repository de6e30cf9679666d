//! In-memory job store and bounded background task runner.
//!
//! This crate provides:
//! - `JobStore`: the process-lifetime mapping from job ID to job record
//! - `TaskRunner`: semaphore-bounded detached execution of removal jobs
//! - delayed best-effort cleanup of input/output files

pub mod cleanup;
pub mod error;
pub mod runner;
pub mod store;

pub use cleanup::{cleanup_files, schedule_cleanup};
pub use error::{JobsError, JobsResult};
pub use runner::{ProcessRequest, Processor, RunnerConfig, TaskRunner, WatermarkProcessor};
pub use store::JobStore;
