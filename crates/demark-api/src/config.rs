//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size (uploads)
    pub max_body_size: usize,
    /// Directory for raw uploads and preview frames
    pub upload_dir: PathBuf,
    /// Directory for processed outputs
    pub processed_dir: PathBuf,
    /// Maximum concurrent processing jobs
    pub max_concurrent_jobs: usize,
    /// Delay before a finished job's files are deleted
    pub cleanup_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 500 * 1024 * 1024, // 500MB
            upload_dir: PathBuf::from("uploads"),
            processed_dir: PathBuf::from("processed"),
            max_concurrent_jobs: 2,
            cleanup_delay: Duration::from_secs(3600),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500 * 1024 * 1024),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            processed_dir: std::env::var("PROCESSED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("processed")),
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
