//! In-memory job store.

use std::collections::HashMap;
use std::sync::RwLock;

use demark_models::{Job, JobId};

use crate::error::{JobsError, JobsResult};

/// The process-lifetime mapping from job ID to job record.
///
/// Created once at process start and shared via `Arc`; records are never
/// deleted, they are abandoned when the process ends. A `std` lock (rather
/// than tokio's) lets the blocking processing thread report progress
/// without an async context; every critical section is a short map access.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly created job record.
    pub fn create(&self, job: Job) {
        let mut jobs = self.jobs.write().unwrap_or_else(|e| e.into_inner());
        jobs.insert(job.id.clone(), job);
    }

    /// Get a snapshot of a job record.
    pub fn get(&self, id: &JobId) -> Option<Job> {
        let jobs = self.jobs.read().unwrap_or_else(|e| e.into_inner());
        jobs.get(id).cloned()
    }

    /// Check whether a job exists.
    pub fn contains(&self, id: &JobId) -> bool {
        let jobs = self.jobs.read().unwrap_or_else(|e| e.into_inner());
        jobs.contains_key(id)
    }

    /// Mutate a job record in place, returning the closure's value.
    ///
    /// The closure runs under the write lock, so a read-then-write
    /// decision (such as claiming an `Uploaded` job) is atomic.
    pub fn update<R>(&self, id: &JobId, mutate: impl FnOnce(&mut Job) -> R) -> JobsResult<R> {
        let mut jobs = self.jobs.write().unwrap_or_else(|e| e.into_inner());
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| JobsError::UnknownJob(id.clone()))?;
        Ok(mutate(job))
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        let jobs = self.jobs.read().unwrap_or_else(|e| e.into_inner());
        jobs.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
