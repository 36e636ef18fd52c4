//! Shared gesture constants.
//!
//! Distances are in density-independent units; multiply by the device
//! density before comparing against pixel coordinates.

/// Movement below this distance from the press position is treated as
/// finger jitter rather than an intentional drag.
pub const TOUCH_SLOP: f32 = 8.0;

/// Idle time after the last pull movement before the pull is abandoned and
/// animated back to rest.
pub const RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MS: u64 = 300;

/// Duration of the offset-return and percentage-shrink animations.
pub const MEDIUM_ANIMATION_DURATION_MS: u64 = 400;

/// Exponent factor of the drag-progress curve, `t^(2 * factor)`.
pub const ACCELERATE_INTERPOLATION_FACTOR: f32 = 1.5;

/// Exponent factor of the return curve, `1 - (1 - t)^(2 * factor)`.
pub const DECELERATE_INTERPOLATION_FACTOR: f32 = 2.0;

/// Trigger distance never exceeds this fraction of the container height.
pub const MAX_SWIPE_DISTANCE_FACTOR: f32 = 0.6;

/// Pull distance that commits to a refresh.
pub const REFRESH_TRIGGER_DISTANCE: f32 = 120.0;

/// Height of the progress bar drawn along the top edge.
pub const PROGRESS_BAR_HEIGHT: f32 = 4.0;

/// Minimum horizontal travel of a row fling.
pub const SWIPE_MIN_DISTANCE: f32 = 120.0;

/// Maximum vertical deviation tolerated during a row fling.
pub const SWIPE_MAX_OFF_PATH: f32 = 150.0;

/// Minimum horizontal velocity of a row fling, per second.
pub const SWIPE_THRESHOLD_VELOCITY: f32 = 150.0;
