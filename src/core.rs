use crate::error::{KeylineError, KeylineResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// 0-based frame index on the composition timeline.
///
/// Signed on purpose: the engine answers queries at frames before 0 (flat hold
/// toward the first keyframe), even though stored keyframes must sit at frame >= 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub i64);

/// Inclusive visibility window `[start, end]` of an element on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameWindow {
    pub start: FrameIndex,
    pub end: FrameIndex, // inclusive
}

impl FrameWindow {
    pub fn new(start: FrameIndex, end: FrameIndex) -> KeylineResult<Self> {
        if start.0 > end.0 {
            return Err(KeylineError::validation("FrameWindow start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> i64 {
        self.end.0.saturating_sub(self.start.0).saturating_add(1)
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 <= self.end.0
    }

    pub fn clamp(self, f: FrameIndex) -> FrameIndex {
        FrameIndex(f.0.clamp(self.start.0, self.end.0))
    }
}

/// Canvas dimensions in pixels, read from the composition settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}
