//! Video decode and encode wrappers.

use std::path::Path;

use opencv::{core, prelude::*, videoio};

use demark_models::Dimensions;

use crate::error::{MediaError, MediaResult};

fn path_str(path: &Path) -> MediaResult<&str> {
    path.to_str()
        .ok_or_else(|| MediaError::InvalidPath(path.to_path_buf()))
}

/// A source video opened for decoding.
///
/// Frames are yielded in decode order until end-of-stream.
pub struct VideoReader {
    cap: videoio::VideoCapture,
}

impl VideoReader {
    /// Open a video file, failing if the container cannot be decoded.
    pub fn open(path: &Path) -> MediaResult<Self> {
        let cap = videoio::VideoCapture::from_file(path_str(path)?, videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(MediaError::open_failed(path));
        }
        Ok(Self { cap })
    }

    /// Source frame rate.
    pub fn fps(&self) -> MediaResult<f64> {
        Ok(self.cap.get(videoio::CAP_PROP_FPS)?)
    }

    /// Source frame dimensions.
    pub fn dimensions(&self) -> MediaResult<Dimensions> {
        let width = self.cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = self.cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        Ok(Dimensions::new(width, height))
    }

    /// Total frame count as reported by the container header.
    ///
    /// Some containers report an inaccurate count; treat this as an
    /// estimate for progress reporting, not a loop bound.
    pub fn frame_count(&self) -> MediaResult<u64> {
        Ok(self.cap.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as u64)
    }

    /// Read the next frame into `frame`. Returns `false` at end-of-stream.
    pub fn read_frame(&mut self, frame: &mut Mat) -> MediaResult<bool> {
        Ok(self.cap.read(frame)?)
    }

    /// Release the decoder.
    pub fn release(&mut self) -> MediaResult<()> {
        self.cap.release()?;
        Ok(())
    }
}

/// An output video opened for encoding.
///
/// Always writes an `mp4v` stream in an `.mp4` container, preserving the
/// source frame rate and dimensions.
pub struct VideoWriter {
    writer: videoio::VideoWriter,
}

impl VideoWriter {
    /// Create an encoder for `path` at the given rate and size.
    pub fn create(path: &Path, fps: f64, dimensions: Dimensions) -> MediaResult<Self> {
        let fourcc = videoio::VideoWriter::fourcc('m', 'p', '4', 'v')?;
        let size = core::Size::new(dimensions.width as i32, dimensions.height as i32);
        let writer = videoio::VideoWriter::new(path_str(path)?, fourcc, fps, size, true)?;
        if !writer.is_opened()? {
            return Err(MediaError::encoder_failed(path));
        }
        Ok(Self { writer })
    }

    /// Append one frame to the output stream.
    pub fn write_frame(&mut self, frame: &Mat) -> MediaResult<()> {
        self.writer.write(frame)?;
        Ok(())
    }

    /// Flush and release the encoder.
    pub fn release(&mut self) -> MediaResult<()> {
        self.writer.release()?;
        Ok(())
    }
}
