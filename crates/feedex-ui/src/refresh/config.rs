use feedex_animation::{AnimationSpec, Easing};
use feedex_foundation::gesture_constants::{
    ACCELERATE_INTERPOLATION_FACTOR, DECELERATE_INTERPOLATION_FACTOR, MAX_SWIPE_DISTANCE_FACTOR,
    MEDIUM_ANIMATION_DURATION_MS, PROGRESS_BAR_HEIGHT, REFRESH_TRIGGER_DISTANCE,
    RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MS, TOUCH_SLOP,
};
use feedex_ui_graphics::{Density, Dp};

/// Tuning of a [`PullRefreshController`](super::PullRefreshController).
///
/// Distances are density-independent and scaled by `density` when used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullRefreshConfig {
    pub touch_slop: f32,
    pub density: Density,
    pub return_timeout_ms: u64,
    pub medium_animation_ms: u64,
    pub max_swipe_distance_factor: f32,
    pub trigger_distance_dp: f32,
    pub progress_bar_height_dp: f32,
    pub accelerate_factor: f32,
    pub decelerate_factor: f32,
}

impl Default for PullRefreshConfig {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            density: Density::BASELINE,
            return_timeout_ms: RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MS,
            medium_animation_ms: MEDIUM_ANIMATION_DURATION_MS,
            max_swipe_distance_factor: MAX_SWIPE_DISTANCE_FACTOR,
            trigger_distance_dp: REFRESH_TRIGGER_DISTANCE,
            progress_bar_height_dp: PROGRESS_BAR_HEIGHT,
            accelerate_factor: ACCELERATE_INTERPOLATION_FACTOR,
            decelerate_factor: DECELERATE_INTERPOLATION_FACTOR,
        }
    }
}

impl PullRefreshConfig {
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn scaled_touch_slop(&self) -> f32 {
        Dp(self.touch_slop).to_px(self.density)
    }

    pub fn progress_bar_height(&self) -> f32 {
        Dp(self.progress_bar_height_dp).to_px(self.density).floor()
    }

    /// Trigger distance before the container height is known.
    pub fn base_trigger_distance(&self) -> f32 {
        Dp(self.trigger_distance_dp).to_px(self.density)
    }

    /// Trigger distance for a container `container_height` pixels tall,
    /// whole pixels.
    pub fn trigger_distance(&self, container_height: f32) -> f32 {
        (container_height * self.max_swipe_distance_factor)
            .min(self.base_trigger_distance())
            .floor()
    }

    pub fn progress_easing(&self) -> Easing {
        Easing::Accelerate(self.accelerate_factor)
    }

    /// Spec of every animation back to rest.
    pub fn return_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(
            self.medium_animation_ms,
            Easing::Decelerate(self.decelerate_factor),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_distance_is_capped_by_container_height() {
        let config = PullRefreshConfig::default();
        assert_eq!(config.trigger_distance(1000.0), 120.0);
        assert_eq!(config.trigger_distance(150.0), 90.0);
    }

    #[test]
    fn distances_scale_with_density() {
        let config = PullRefreshConfig::default().with_density(Density(2.0));
        assert_eq!(config.trigger_distance(1000.0), 240.0);
        assert_eq!(config.scaled_touch_slop(), 16.0);
        assert_eq!(config.progress_bar_height(), 8.0);
    }
}
