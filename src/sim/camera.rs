//! Camera scroll smoothing

use serde::{Deserialize, Serialize};

use crate::consts::{SCROLL_EASE, SCROLL_MIN_STEP};

/// Vertical scroll offsets (pixels added to world y when drawing)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub actual_offset: f32,
    pub target_offset: f32,
}

impl ScrollState {
    pub fn raise_target(&mut self, amount: f32) {
        self.target_offset += amount;
    }

    /// Move `actual_offset` toward the target by one damped step.
    ///
    /// Covers `SCROLL_EASE` of the remaining distance, at least
    /// `SCROLL_MIN_STEP`, and is clamped so it never passes the target.
    /// Returns whether the offset moved.
    pub fn step(&mut self) -> bool {
        if self.actual_offset >= self.target_offset {
            return false;
        }
        let delta = self.target_offset - self.actual_offset;
        let step = (delta * SCROLL_EASE).max(SCROLL_MIN_STEP);
        self.actual_offset = (self.actual_offset + step).min(self.target_offset);
        true
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.actual_offset >= self.target_offset
    }
}
