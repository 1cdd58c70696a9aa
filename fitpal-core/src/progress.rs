//! Goal progress for the daily calorie ring.

use serde::Serialize;

/// Progress of consumed calories toward a daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub consumed: u64,
    pub goal: u32,
    /// Percent of the goal reached, clamped to `0..=100`.
    pub percentage: f64,
    /// Calories left before the goal is reached, never negative.
    pub remaining: u64,
}

impl Progress {
    pub fn compute(consumed: u64, goal: u32) -> Self {
        let percentage = if goal > 0 {
            (consumed as f64 / f64::from(goal) * 100.0).min(100.0)
        } else {
            0.0
        };
        let remaining = u64::from(goal).saturating_sub(consumed);

        Self {
            consumed,
            goal,
            percentage,
            remaining,
        }
    }

    /// Stroke offset for a ring of the given circumference.
    ///
    /// The full circumference at 0%, zero at 100%.
    pub fn ring_offset(&self, circumference: f64) -> f64 {
        circumference - (self.percentage / 100.0) * circumference
    }
}
