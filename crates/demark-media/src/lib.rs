//! OpenCV wrapper for per-frame watermark removal.
//!
//! This crate provides:
//! - `VideoReader`/`VideoWriter`: thin decode/encode wrappers
//! - `remove_watermark`: the frame-by-frame processing pass
//! - preview frame extraction and dimension probing
//!
//! All functions here are synchronous and block on frame I/O; callers run
//! them on a blocking thread (`tokio::task::spawn_blocking`).

pub mod error;
pub mod preview;
pub mod remover;
pub mod video;

pub use error::{MediaError, MediaResult};
pub use preview::{extract_preview, probe_dimensions};
pub use remover::{remove_watermark, RemovalReport};
pub use video::{VideoReader, VideoWriter};
