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

//! Capture formats and the fps/interval unit conversion the pipeline
//! boundary requires.

use std::fmt;
use std::time::Duration;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// `interval = round(1s / fps)`. Panics on zero fps; a zero rate is a
/// caller bug, not a negotiable format.
pub fn fps_to_interval(fps: u32) -> Duration {
    assert!(fps > 0, "fps must be positive");
    let fps = u64::from(fps);
    Duration::from_nanos((NANOS_PER_SECOND + fps / 2) / fps)
}

/// `fps = round(1s / interval)`. Exact round-trip with [`fps_to_interval`]
/// for the usual camera rates.
pub fn interval_to_fps(interval: Duration) -> u32 {
    let nanos = u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX);
    assert!(nanos > 0, "interval must be positive");
    ((NANOS_PER_SECOND + nanos / 2) / nanos) as u32
}

/// Common capture resolutions, `(width, height)`.
pub mod dimensions {
    pub const QCIF: (u32, u32) = (176, 144);
    pub const CIF: (u32, u32) = (352, 288);
    pub const VGA: (u32, u32) = (640, 480);
    pub const HD_720P: (u32, u32) = (1280, 720);
    pub const HD_1080P: (u32, u32) = (1920, 1080);
}

/// Pixel layouts the platform capturers deliver. The adapter's fixed
/// preference is [`PixelLayout::Yv12`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Yv12,
    Nv21,
    I420,
    Rgba8888,
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelLayout::Yv12 => write!(f, "YV12"),
            PixelLayout::Nv21 => write!(f, "NV21"),
            PixelLayout::I420 => write!(f, "I420"),
            PixelLayout::Rgba8888 => write!(f, "RGBA8888"),
        }
    }
}

/// A capture format: resolution plus the interval between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureFormat {
    pub width: u32,
    pub height: u32,
    pub interval: Duration,
}

impl CaptureFormat {
    pub fn new(width: u32, height: u32, interval: Duration) -> Self {
        Self {
            width,
            height,
            interval,
        }
    }

    pub fn from_fps(width: u32, height: u32, fps: u32) -> Self {
        Self::new(width, height, fps_to_interval(fps))
    }

    pub fn fps(&self) -> u32 {
        interval_to_fps(self.interval)
    }

    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}fps", self.width, self.height, self.fps())
    }
}
