//! Preview frame extraction and upload-time probing.

use std::path::Path;

use opencv::{imgcodecs, prelude::*};
use tracing::debug;

use demark_models::Dimensions;

use crate::error::{MediaError, MediaResult};
use crate::video::VideoReader;

/// Decode the first frame of `input` and write it to `output` as a JPEG,
/// for the region-selection page.
pub fn extract_preview(input: &Path, output: &Path) -> MediaResult<()> {
    let mut reader = VideoReader::open(input)?;

    let mut frame = Mat::default();
    let got_frame = reader.read_frame(&mut frame)?;
    reader.release()?;

    if !got_frame || frame.empty() {
        return Err(MediaError::EmptyVideo(input.to_path_buf()));
    }

    let output_str = output
        .to_str()
        .ok_or_else(|| MediaError::InvalidPath(output.to_path_buf()))?;
    if !imgcodecs::imwrite_def(output_str, &frame)? {
        return Err(MediaError::ImageWriteFailed(output.to_path_buf()));
    }

    debug!(preview = %output.display(), "Wrote preview frame");
    Ok(())
}

/// Open `input` just long enough to capture its frame dimensions.
pub fn probe_dimensions(input: &Path) -> MediaResult<Dimensions> {
    let mut reader = VideoReader::open(input)?;
    let dimensions = reader.dimensions()?;
    reader.release()?;
    Ok(dimensions)
}
