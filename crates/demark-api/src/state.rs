//! Application state.

use std::sync::Arc;

use demark_jobs::{JobStore, RunnerConfig, TaskRunner, WatermarkProcessor};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<JobStore>,
    pub runner: Arc<TaskRunner>,
}

impl AppState {
    /// Create new application state, creating the storage directories.
    pub fn new(config: ApiConfig) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;
        std::fs::create_dir_all(&config.processed_dir)?;

        let store = Arc::new(JobStore::new());
        let runner = Arc::new(TaskRunner::new(
            Arc::clone(&store),
            Arc::new(WatermarkProcessor),
            RunnerConfig {
                max_concurrent_jobs: config.max_concurrent_jobs,
                cleanup_delay: config.cleanup_delay,
            },
        ));

        Ok(Self {
            config,
            store,
            runner,
        })
    }
}
