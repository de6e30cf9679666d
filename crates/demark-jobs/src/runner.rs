//! Background task runner.
//!
//! Drives the `Uploaded -> Processing -> {Completed, Failed}` state
//! machine: each submitted job runs detached on the blocking pool under a
//! semaphore that bounds concurrent processing, and every terminal state
//! schedules delayed cleanup of the job's files. There is no cancellation;
//! a spawned job always runs to a terminal state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

use demark_media::{MediaResult, RemovalReport};
use demark_models::{JobId, JobStatus, Method, Region};

use crate::cleanup::schedule_cleanup;
use crate::store::JobStore;

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum concurrent processing jobs
    pub max_concurrent_jobs: usize,
    /// Delay before a finished job's files are deleted
    pub cleanup_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 2,
            cleanup_delay: Duration::from_secs(3600),
        }
    }
}

impl RunnerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_jobs: std::env::var("MAX_CONCURRENT_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            cleanup_delay: Duration::from_secs(
                std::env::var("CLEANUP_DELAY_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
        }
    }
}

/// Everything the processing pass needs for one job.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub job_id: JobId,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Preview JPEG, included in cleanup when present
    pub preview_path: Option<PathBuf>,
    pub region: Region,
    pub method: Method,
}

/// The blocking processing pass, pluggable for tests.
pub trait Processor: Send + Sync + 'static {
    fn process(
        &self,
        request: &ProcessRequest,
        progress: &mut dyn FnMut(u8),
    ) -> MediaResult<RemovalReport>;
}

/// Production processor: the OpenCV frame loop.
pub struct WatermarkProcessor;

impl Processor for WatermarkProcessor {
    fn process(
        &self,
        request: &ProcessRequest,
        progress: &mut dyn FnMut(u8),
    ) -> MediaResult<RemovalReport> {
        demark_media::remove_watermark(
            &request.input_path,
            &request.output_path,
            request.region,
            request.method,
            |p| progress(p),
        )
    }
}

/// Executes watermark removal jobs with bounded concurrency.
pub struct TaskRunner {
    store: Arc<JobStore>,
    processor: Arc<dyn Processor>,
    semaphore: Arc<Semaphore>,
    config: RunnerConfig,
}

impl TaskRunner {
    /// Create a new runner backed by `store`.
    pub fn new(store: Arc<JobStore>, processor: Arc<dyn Processor>, config: RunnerConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1)));
        Self {
            store,
            processor,
            semaphore,
            config,
        }
    }

    /// Submit a job for background processing.
    ///
    /// The job is claimed under the store lock: only an `Uploaded` job
    /// transitions to `Processing` and spawns a task, so a duplicate
    /// submission returns `None` instead of racing a second pass over the
    /// same files. The transition happens before this returns, so pollers
    /// observe the launch even while the task waits for a concurrency
    /// permit. All processing errors are recorded on the job record; the
    /// returned handle never carries an error and exists mainly for tests.
    pub fn spawn(&self, request: ProcessRequest) -> Option<JoinHandle<()>> {
        let store = Arc::clone(&self.store);
        let processor = Arc::clone(&self.processor);
        let semaphore = Arc::clone(&self.semaphore);
        let cleanup_delay = self.config.cleanup_delay;

        let claimed = store
            .update(&request.job_id, |job| {
                if job.status == JobStatus::Uploaded {
                    job.begin_processing();
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if !claimed {
            return None;
        }

        Some(tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore is never closed while the runner lives.
                Err(_) => return,
            };

            let job_id = request.job_id.clone();
            let mut cleanup_paths = vec![request.input_path.clone(), request.output_path.clone()];
            if let Some(preview) = &request.preview_path {
                cleanup_paths.push(preview.clone());
            }

            let progress_store = Arc::clone(&store);
            let progress_id = job_id.clone();
            let result = tokio::task::spawn_blocking(move || {
                let mut sink = |p: u8| {
                    let _ = progress_store.update(&progress_id, |job| job.set_progress(p));
                };
                processor.process(&request, &mut sink)
            })
            .await;

            match result {
                Ok(Ok(report)) => {
                    info!(
                        job_id = %job_id,
                        frames = report.frames_written,
                        fps = report.fps,
                        "Job completed"
                    );
                    let _ = store.update(&job_id, |job| job.complete());
                }
                Ok(Err(e)) => {
                    error!(job_id = %job_id, error = %e, "Job failed");
                    let _ = store.update(&job_id, |job| job.fail(e.to_string()));
                }
                Err(join_err) => {
                    error!(job_id = %job_id, error = %join_err, "Processing task panicked");
                    let _ = store.update(&job_id, |job| {
                        job.fail(format!("processing task panicked: {join_err}"))
                    });
                }
            }

            schedule_cleanup(cleanup_paths, cleanup_delay);
        }))
    }

    /// The store this runner writes to.
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }
}
