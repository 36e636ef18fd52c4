//! Horizontal fling recogniser.

use feedex_ui_graphics::{Density, Point};

use crate::gesture_constants::{SWIPE_MAX_OFF_PATH, SWIPE_MIN_DISTANCE, SWIPE_THRESHOLD_VELOCITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlingDirection {
    Left,
    Right,
}

/// Acceptance thresholds for a row fling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingThresholds {
    /// Minimum horizontal travel between start and end.
    pub min_distance: f32,
    /// Maximum vertical deviation between start and end.
    pub max_off_path: f32,
    /// Minimum absolute horizontal velocity, per second.
    pub velocity_threshold: f32,
}

impl Default for FlingThresholds {
    fn default() -> Self {
        Self {
            min_distance: SWIPE_MIN_DISTANCE,
            max_off_path: SWIPE_MAX_OFF_PATH,
            velocity_threshold: SWIPE_THRESHOLD_VELOCITY,
        }
    }
}

impl FlingThresholds {
    /// Thresholds converted to pixels for `density`.
    pub fn scaled(&self, density: Density) -> Self {
        Self {
            min_distance: density.scale(self.min_distance),
            max_off_path: density.scale(self.max_off_path),
            velocity_threshold: density.scale(self.velocity_threshold),
        }
    }

    /// Whether the fling stays on its horizontal path and is fast enough.
    pub fn accepts(&self, start: Point, end: Point, velocity_x: f32) -> bool {
        (start.y - end.y).abs() <= self.max_off_path && velocity_x.abs() >= self.velocity_threshold
    }

    /// Direction of travel, if it exceeds the minimum distance.
    pub fn direction(&self, start: Point, end: Point) -> Option<FlingDirection> {
        if start.x - end.x > self.min_distance {
            Some(FlingDirection::Left)
        } else if end.x - start.x > self.min_distance {
            Some(FlingDirection::Right)
        } else {
            None
        }
    }
}

/// Classifies a completed horizontal fling. Pure in its inputs.
pub fn classify_fling(
    start: Point,
    end: Point,
    velocity_x: f32,
    thresholds: &FlingThresholds,
) -> Option<FlingDirection> {
    if !thresholds.accepts(start, end, velocity_x) {
        return None;
    }
    thresholds.direction(start, end)
}
