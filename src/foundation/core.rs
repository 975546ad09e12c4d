use crate::foundation::error::{StoryError, StoryResult};

pub use kurbo::{Affine, Point, Vec2};

/// Zero-based frame index on a timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame inside the range.
    pub start: FrameIndex,
    /// First frame after the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> StoryResult<Self> {
        if start.0 > end.0 {
            return Err(StoryError::configuration(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Range of `len` frames beginning at `start`. Fails when the end does not fit in `u64`.
    pub fn with_len(start: FrameIndex, len: u64) -> StoryResult<Self> {
        let end = start.0.checked_add(len).ok_or_else(|| {
            StoryError::configuration(format!(
                "frame range starting at {} with {len} frames overflows u64",
                start.0
            ))
        })?;
        Ok(Self {
            start,
            end: FrameIndex(end),
        })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Half-open containment test.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Integer frame rate expressed as a rational `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> StoryResult<Self> {
        if den == 0 {
            return Err(StoryError::configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StoryError::configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds covered by `frames` frames.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames * f64::from(self.den) / f64::from(self.num)
    }

    /// Whole frames in `secs` seconds, rounded to the nearest frame.
    pub fn secs_to_frames(self, secs: u64) -> u64 {
        (secs as f64 * self.as_f64()).round().max(0.0) as u64
    }
}

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Position on the frame in percent of width/height, each axis in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Percent2 {
    /// Horizontal percentage.
    pub x: f64,
    /// Vertical percentage.
    pub y: f64,
}

impl Percent2 {
    /// Build a position from raw percentages.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` when both axes lie in `[0, 100]`.
    pub fn is_normalized(self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }

    /// Convert to a pixel point on `canvas`.
    pub fn to_point(self, canvas: Canvas) -> Point {
        Point::new(
            self.x / 100.0 * f64::from(canvas.width),
            self.y / 100.0 * f64::from(canvas.height),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
