//! HTTP server for the watermark removal service.
//!
//! Exposes a small server-rendered flow (upload, region selection,
//! status) next to a JSON status endpoint and file downloads.

pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
