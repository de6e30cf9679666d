//! The frame-by-frame watermark removal pass.
//!
//! A single binary mask the size of one frame is built once and reused for
//! every frame (the watermark is assumed static). Each decoded frame is
//! either inpainted inside the mask (Telea fast-marching, 3 px radius) or
//! has the region replaced with a 25x25 Gaussian blur of itself, then is
//! written to an `mp4v`/`.mp4` output at the source rate and size.

use std::path::Path;

use opencv::{core, imgproc, photo, prelude::*};
use tracing::{debug, info};

use demark_models::{Dimensions, Method, Region};

use crate::error::MediaResult;
use crate::video::{VideoReader, VideoWriter};

/// Neighborhood radius for Telea inpainting, in pixels.
const INPAINT_RADIUS: f64 = 3.0;

/// Gaussian kernel side length for the blur method.
const BLUR_KERNEL: i32 = 25;

/// Progress is reported every this many frames.
const PROGRESS_INTERVAL: u64 = 10;

/// Progress ceiling while the pass is still running. 100 is only ever set
/// by the caller after the whole pass completes, so pollers can tell
/// "almost done" from "done".
const PROGRESS_CEILING: u8 = 99;

/// Summary of a completed removal pass.
#[derive(Debug, Clone, Copy)]
pub struct RemovalReport {
    /// Frames decoded, transformed and written
    pub frames_written: u64,
    /// Source (and output) frame rate
    pub fps: f64,
    /// Source (and output) frame dimensions
    pub dimensions: Dimensions,
}

/// Remove the watermark in `region` from `input`, writing the result to
/// `output`.
///
/// The region is validated against the actual frame bounds before any
/// output is created. `progress` receives a percentage in `0..=99` every
/// tenth frame; the final 100 is the caller's responsibility once the job
/// record reaches its terminal state.
///
/// On error a partial output file may remain on disk; the caller must not
/// present it as valid.
pub fn remove_watermark(
    input: &Path,
    output: &Path,
    region: Region,
    method: Method,
    mut progress: impl FnMut(u8),
) -> MediaResult<RemovalReport> {
    let mut reader = VideoReader::open(input)?;
    let fps = reader.fps()?;
    let dimensions = reader.dimensions()?;
    let total_frames = reader.frame_count()?;

    region.validate(&dimensions)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        region = %region,
        method = %method,
        frames = total_frames,
        fps = fps,
        "Starting watermark removal"
    );

    let mask = build_mask(dimensions, region)?;
    let rect = to_rect(region);
    let mut writer = VideoWriter::create(output, fps, dimensions)?;

    let mut frame = Mat::default();
    let mut frames_written: u64 = 0;

    while reader.read_frame(&mut frame)? {
        let processed = match method {
            Method::Inpaint => inpaint_frame(&frame, &mask)?,
            Method::Blur => blur_frame(&frame, rect)?,
        };
        writer.write_frame(&processed)?;
        frames_written += 1;

        if frames_written % PROGRESS_INTERVAL == 0 {
            progress(progress_percent(frames_written, total_frames));
        }
    }

    reader.release()?;
    writer.release()?;

    debug!(frames = frames_written, "Watermark removal pass finished");

    Ok(RemovalReport {
        frames_written,
        fps,
        dimensions,
    })
}

/// Build the single-channel inpainting mask: 255 inside the watermark
/// region, 0 elsewhere.
pub fn build_mask(dimensions: Dimensions, region: Region) -> MediaResult<Mat> {
    region.validate(&dimensions)?;

    let mut mask = Mat::zeros(
        dimensions.height as i32,
        dimensions.width as i32,
        core::CV_8UC1,
    )?
    .to_mat()?;

    let mut roi = mask.roi_mut(to_rect(region))?;
    roi.set_to(&core::Scalar::all(255.0), &core::no_array())?;
    drop(roi);

    Ok(mask)
}

/// Reconstruct the masked region from surrounding content.
fn inpaint_frame(frame: &Mat, mask: &Mat) -> MediaResult<Mat> {
    let mut processed = Mat::default();
    photo::inpaint(
        frame,
        mask,
        &mut processed,
        INPAINT_RADIUS,
        photo::INPAINT_TELEA,
    )?;
    Ok(processed)
}

/// Copy the frame and overwrite the region with a Gaussian blur of itself.
/// Pixels outside the region are bit-identical to the source.
fn blur_frame(frame: &Mat, rect: core::Rect) -> MediaResult<Mat> {
    let mut processed = frame.try_clone()?;

    let patch = frame.roi(rect)?.try_clone()?;
    let mut blurred = Mat::default();
    imgproc::gaussian_blur_def(
        &patch,
        &mut blurred,
        core::Size::new(BLUR_KERNEL, BLUR_KERNEL),
        0.0,
    )?;

    let mut target = processed.roi_mut(rect)?;
    blurred.copy_to(&mut target)?;
    drop(target);

    Ok(processed)
}

fn to_rect(region: Region) -> core::Rect {
    core::Rect::new(region.x, region.y, region.width, region.height)
}

/// Fractional progress capped below 100 while the pass is running.
fn progress_percent(frames_done: u64, total_frames: u64) -> u8 {
    if total_frames == 0 {
        return 0;
    }
    let pct = frames_done.saturating_mul(100) / total_frames;
    (pct.min(PROGRESS_CEILING as u64)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Dimensions = Dimensions {
        width: 320,
        height: 240,
    };

    #[test]
    fn test_progress_percent_caps_below_completion() {
        assert_eq!(progress_percent(10, 100), 10);
        assert_eq!(progress_percent(50, 100), 50);
        assert_eq!(progress_percent(100, 100), PROGRESS_CEILING);
        assert_eq!(progress_percent(500, 100), PROGRESS_CEILING);
    }

    #[test]
    fn test_progress_percent_unknown_total() {
        // Containers with a broken frame-count header report 0.
        assert_eq!(progress_percent(42, 0), 0);
    }

    #[test]
    fn test_build_mask_geometry() {
        let region = Region::new(10, 10, 50, 20);
        let mask = build_mask(FRAME, region).unwrap();

        assert_eq!(mask.rows(), 240);
        assert_eq!(mask.cols(), 320);
        assert_eq!(
            core::count_non_zero(&mask).unwrap(),
            region.width * region.height
        );
        assert_eq!(*mask.at_2d::<u8>(15, 30).unwrap(), 255);
        assert_eq!(*mask.at_2d::<u8>(15, 5).unwrap(), 0);
        assert_eq!(*mask.at_2d::<u8>(100, 100).unwrap(), 0);
    }

    #[test]
    fn test_build_mask_rejects_out_of_bounds() {
        assert!(build_mask(FRAME, Region::new(300, 10, 50, 20)).is_err());
    }

    #[test]
    fn test_blur_leaves_outside_pixels_untouched() {
        let base = core::Scalar::new(40.0, 80.0, 120.0, 0.0);
        let mut frame = Mat::new_rows_cols_with_default(64, 64, core::CV_8UC3, base).unwrap();

        // Paint half of the watermark area white so the blur has contrast.
        let rect = core::Rect::new(8, 8, 16, 16);
        let mut half = frame.roi_mut(core::Rect::new(8, 8, 8, 16)).unwrap();
        half.set_to(&core::Scalar::all(255.0), &core::no_array())
            .unwrap();
        drop(half);

        let processed = blur_frame(&frame, rect).unwrap();

        let base_px = core::Vec3b::from([40, 80, 120]);
        // Outside the region: bit-identical to the source.
        assert_eq!(*processed.at_2d::<core::Vec3b>(40, 40).unwrap(), base_px);
        assert_eq!(*processed.at_2d::<core::Vec3b>(12, 30).unwrap(), base_px);
        // Inside: the white/base boundary is smeared by the 25x25 kernel.
        let inside = *processed.at_2d::<core::Vec3b>(12, 15).unwrap();
        assert_ne!(inside, core::Vec3b::from([255, 255, 255]));
        assert_ne!(inside, base_px);
    }

    #[test]
    #[ignore = "needs an mp4v-capable OpenCV build at runtime"]
    fn test_remove_watermark_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.mp4");
        let output = dir.path().join("output.mp4");

        let dims = Dimensions::new(64, 48);
        let blue = core::Scalar::new(255.0, 0.0, 0.0, 0.0);
        let mut writer = VideoWriter::create(&input, 10.0, dims).unwrap();
        for _ in 0..20 {
            let mut frame = Mat::new_rows_cols_with_default(48, 64, core::CV_8UC3, blue).unwrap();
            let mut wm = frame.roi_mut(core::Rect::new(10, 10, 12, 8)).unwrap();
            wm.set_to(&core::Scalar::all(255.0), &core::no_array())
                .unwrap();
            drop(wm);
            writer.write_frame(&frame).unwrap();
        }
        writer.release().unwrap();

        let mut updates = Vec::new();
        let report = remove_watermark(
            &input,
            &output,
            Region::new(10, 10, 12, 8),
            Method::Inpaint,
            |p| updates.push(p),
        )
        .unwrap();

        assert_eq!(report.frames_written, 20);
        assert!(output.is_file());
        assert!(updates.iter().all(|p| *p <= PROGRESS_CEILING));
        assert!(updates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_inpaint_replaces_region_interior() {
        let blue = core::Scalar::new(255.0, 0.0, 0.0, 0.0);
        let mut frame = Mat::new_rows_cols_with_default(64, 64, core::CV_8UC3, blue).unwrap();

        // Solid white "watermark".
        let region = Region::new(20, 20, 16, 16);
        let mut wm = frame.roi_mut(to_rect(region)).unwrap();
        wm.set_to(&core::Scalar::all(255.0), &core::no_array())
            .unwrap();
        drop(wm);

        let mask = build_mask(Dimensions::new(64, 64), region).unwrap();
        let processed = inpaint_frame(&frame, &mask).unwrap();

        // The interior must be reconstructed from the blue surround, not
        // left as the white watermark.
        let center = *processed.at_2d::<core::Vec3b>(28, 28).unwrap();
        assert_ne!(center, core::Vec3b::from([255, 255, 255]));
        assert!(center[0] > 128, "expected blue-dominant fill, got {:?}", center);
    }
}
