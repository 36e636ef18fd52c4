use feedex_foundation::gesture_constants::TOUCH_SLOP;
use feedex_foundation::FlingThresholds;
use feedex_ui_graphics::{Density, Dp};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemToggleConfig {
    pub thresholds: FlingThresholds,
    pub density: Density,
    pub touch_slop: f32,
}

impl Default for ItemToggleConfig {
    fn default() -> Self {
        Self {
            thresholds: FlingThresholds::default(),
            density: Density::BASELINE,
            touch_slop: TOUCH_SLOP,
        }
    }
}

impl ItemToggleConfig {
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn scaled_thresholds(&self) -> FlingThresholds {
        self.thresholds.scaled(self.density)
    }

    pub fn scaled_touch_slop(&self) -> f32 {
        Dp(self.touch_slop).to_px(self.density)
    }
}
