//! Watermark region geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::video::Dimensions;

/// A rectangular watermark region in integer pixel coordinates,
/// relative to the top-left corner of the source frame.
///
/// Coordinates are signed so that out-of-range form input can be carried
/// into processing and rejected there with a bounds error, rather than
/// failing at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// X coordinate of the top-left corner
    pub x: i32,
    /// Y coordinate of the top-left corner
    pub y: i32,
    /// Width of the region in pixels
    pub width: i32,
    /// Height of the region in pixels
    pub height: i32,
}

/// Validation failure for a watermark region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("watermark region has no area ({width}x{height})")]
    EmptyRegion { width: i32, height: i32 },

    #[error("watermark coordinates out of video bounds: region {region} does not fit in frame {frame}")]
    OutOfBounds { region: String, frame: Dimensions },
}

impl Region {
    /// Create a new region.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Validate this region against the frame bounds.
    ///
    /// A region is valid when it has positive area and lies entirely inside
    /// the frame: `x >= 0`, `y >= 0`, `x + width <= frame_width`,
    /// `y + height <= frame_height`. A region touching the frame edge is
    /// still valid.
    pub fn validate(&self, frame: &Dimensions) -> Result<(), RegionError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(RegionError::EmptyRegion {
                width: self.width,
                height: self.height,
            });
        }

        let fits_x = self.x >= 0 && i64::from(self.x) + i64::from(self.width) <= i64::from(frame.width);
        let fits_y =
            self.y >= 0 && i64::from(self.y) + i64::from(self.height) <= i64::from(frame.height);

        if !fits_x || !fits_y {
            return Err(RegionError::OutOfBounds {
                region: self.to_string(),
                frame: *frame,
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.x, self.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Dimensions = Dimensions {
        width: 320,
        height: 240,
    };

    #[test]
    fn test_valid_region() {
        assert!(Region::new(10, 10, 50, 20).validate(&FRAME).is_ok());
    }

    #[test]
    fn test_region_touching_edge_is_valid() {
        assert!(Region::new(270, 220, 50, 20).validate(&FRAME).is_ok());
        assert!(Region::new(0, 0, 320, 240).validate(&FRAME).is_ok());
    }

    #[test]
    fn test_region_exceeding_width() {
        let err = Region::new(300, 10, 50, 20).validate(&FRAME).unwrap_err();
        assert!(matches!(err, RegionError::OutOfBounds { .. }));
        assert!(err.to_string().contains("out of video bounds"));
    }

    #[test]
    fn test_region_exceeding_height() {
        assert!(Region::new(10, 230, 20, 20).validate(&FRAME).is_err());
    }

    #[test]
    fn test_negative_origin() {
        assert!(Region::new(-1, 10, 50, 20).validate(&FRAME).is_err());
        assert!(Region::new(10, -1, 50, 20).validate(&FRAME).is_err());
    }

    #[test]
    fn test_zero_area_region() {
        let err = Region::new(10, 10, 0, 20).validate(&FRAME).unwrap_err();
        assert!(matches!(err, RegionError::EmptyRegion { .. }));
        assert!(Region::new(10, 10, 20, 0).validate(&FRAME).is_err());
    }

    #[test]
    fn test_overflow_does_not_wrap() {
        // x + width would overflow i32; the i64 check must still reject it.
        assert!(Region::new(i32::MAX, 10, i32::MAX, 20).validate(&FRAME).is_err());
    }
}
