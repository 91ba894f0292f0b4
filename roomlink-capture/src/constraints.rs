/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Video constraints and selection of a supported format that satisfies
//! them.

use crate::format::CaptureFormat;

/// Bounds on the capture format an application will accept: dimension
/// ranges as `(width, height)` pairs plus an fps range, all inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoConstraints {
    pub min_dimensions: (u32, u32),
    pub max_dimensions: (u32, u32),
    pub min_fps: u32,
    pub max_fps: u32,
}

impl VideoConstraints {
    pub fn new(
        min_dimensions: (u32, u32),
        max_dimensions: (u32, u32),
        min_fps: u32,
        max_fps: u32,
    ) -> Self {
        Self {
            min_dimensions,
            max_dimensions,
            min_fps,
            max_fps,
        }
    }

    pub fn satisfied_by(&self, format: &CaptureFormat) -> bool {
        let fps = format.fps();
        format.width >= self.min_dimensions.0
            && format.height >= self.min_dimensions.1
            && format.width <= self.max_dimensions.0
            && format.height <= self.max_dimensions.1
            && fps >= self.min_fps
            && fps <= self.max_fps
    }

    /// Picks the cheapest supported format that satisfies the constraints:
    /// lowest fps first, smallest pixel area as the tie break. `None` when
    /// nothing in `supported` fits.
    pub fn closest_supported_format(&self, supported: &[CaptureFormat]) -> Option<CaptureFormat> {
        supported
            .iter()
            .filter(|format| self.satisfied_by(format))
            .min_by_key(|format| (format.fps(), format.pixel_area()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::dimensions::{CIF, HD_1080P, HD_720P, QCIF, VGA};

    fn formats(entries: &[((u32, u32), u32)]) -> Vec<CaptureFormat> {
        entries
            .iter()
            .map(|((w, h), fps)| CaptureFormat::from_fps(*w, *h, *fps))
            .collect()
    }

    #[test]
    fn picks_lowest_fps_then_smallest_area() {
        let supported = formats(&[(HD_720P, 30), (VGA, 30), (CIF, 30), (VGA, 24), (CIF, 24)]);
        let constraints = VideoConstraints::new(QCIF, HD_720P, 24, 30);
        let chosen = constraints.closest_supported_format(&supported).unwrap();
        assert_eq!(chosen, CaptureFormat::from_fps(CIF.0, CIF.1, 24));
    }

    #[test]
    fn fps_floor_excludes_slow_formats() {
        let supported = formats(&[(VGA, 15), (VGA, 24), (HD_720P, 30)]);
        let constraints = VideoConstraints::new(QCIF, HD_720P, 24, 60);
        let chosen = constraints.closest_supported_format(&supported).unwrap();
        assert_eq!(chosen, CaptureFormat::from_fps(VGA.0, VGA.1, 24));
    }

    #[test]
    fn dimension_bounds_are_inclusive() {
        let supported = formats(&[(HD_1080P, 30)]);
        let constraints = VideoConstraints::new(HD_1080P, HD_1080P, 30, 30);
        assert!(constraints.closest_supported_format(&supported).is_some());
    }

    #[test]
    fn none_when_nothing_satisfies() {
        let supported = formats(&[(QCIF, 15), (CIF, 15)]);
        let constraints = VideoConstraints::new(VGA, HD_720P, 24, 30);
        assert_eq!(constraints.closest_supported_format(&supported), None);
    }
}
