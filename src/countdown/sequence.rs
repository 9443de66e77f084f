use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::core::FrameIndex;

/// Largest distance a countdown can show: `99 : 23 : 59 : 59`.
pub const MAX_DISTANCE_SECS: i64 = 100 * 24 * 60 * 60 - 1;

/// Number of one-second frames rendered when the target is a minute or more away.
pub const DEFAULT_FRAME_BUDGET: u32 = 60;

/// One frame to render: its position and the seconds it displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSpec {
    pub index: FrameIndex,
    pub remaining_secs: i64,
}

/// Clamped distance to the target plus the ordered frames to render.
///
/// Frame `i` always shows `distance - i`, and every value is non-negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePlan {
    distance: i64,
    frames: Vec<FrameSpec>,
}

impl FramePlan {
    /// Plan with the default 60-frame budget.
    pub fn new(end_time: i64, now: i64) -> Self {
        Self::with_budget(end_time, now, DEFAULT_FRAME_BUDGET)
    }

    /// Plan with an explicit frame budget (clamped to at least one frame).
    ///
    /// - more than [`MAX_DISTANCE_SECS`] away: clamp the distance, `budget` frames
    /// - already expired (`<= 0`): distance 0, a single frame
    /// - less than `budget` seconds away: one frame per remaining second
    /// - otherwise: `budget` frames counting down from the distance
    pub fn with_budget(end_time: i64, now: i64, budget: u32) -> Self {
        let budget = budget.max(1);
        let raw = end_time.saturating_sub(now);

        let (distance, count) = if raw > MAX_DISTANCE_SECS {
            (MAX_DISTANCE_SECS, budget)
        } else if raw <= 0 {
            (0, 1)
        } else if raw < i64::from(budget) {
            // Bounded by `budget` in this branch, so the cast is lossless.
            (raw, raw as u32)
        } else {
            (raw, budget)
        };

        let frames = (0..count)
            .map(|i| FrameSpec {
                index: FrameIndex(i),
                remaining_secs: distance - i64::from(i),
            })
            .collect();

        Self { distance, frames }
    }

    pub fn distance(&self) -> i64 {
        self.distance
    }

    pub fn frames(&self) -> &[FrameSpec] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Current wall-clock time as whole seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => -i64::try_from(e.duration().as_secs()).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/sequence.rs"]
mod tests;
