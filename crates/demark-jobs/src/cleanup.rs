//! Delayed best-effort file cleanup.
//!
//! After a job reaches a terminal state its input, output and preview
//! files are deleted once a fixed interval has elapsed. Deletion errors
//! are suppressed; if the process exits before the interval, cleanup
//! simply never runs (job state is not persistent either).

use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Delete the given files, ignoring missing ones and logging (but
/// otherwise suppressing) any other deletion error.
pub async fn cleanup_files(paths: &[PathBuf]) {
    for path in paths {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "Removed expired file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove expired file"),
        }
    }
}

/// Fire-and-forget: wait `delay`, then delete `paths`.
pub fn schedule_cleanup(paths: Vec<PathBuf>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        cleanup_files(&paths).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_removes_existing_and_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("input.mp4");
        let missing = dir.path().join("never-existed.mp4");
        std::fs::write(&present, b"data").unwrap();

        cleanup_files(&[present.clone(), missing]).await;

        assert!(!present.exists());
    }

    #[tokio::test]
    async fn test_scheduled_cleanup_runs_after_delay() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("output.mp4");
        std::fs::write(&file, b"data").unwrap();

        schedule_cleanup(vec![file.clone()], Duration::from_millis(10))
            .await
            .unwrap();

        assert!(!file.exists());
    }
}
