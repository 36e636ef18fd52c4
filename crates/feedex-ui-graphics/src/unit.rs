//! Unit types: Dp, Density, and conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: Density) -> f32 {
        self.0 * density.0
    }

    pub fn from_px(px: f32, density: Density) -> Self {
        Self(px / density.0)
    }
}

/// Display density scale factor (pixels per dp).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Density(pub f32);

impl Density {
    pub const BASELINE: Density = Density(1.0);

    pub fn scale(&self, value: f32) -> f32 {
        value * self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::BASELINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_round_trips_through_density() {
        let density = Density(2.5);
        assert_eq!(Dp(4.0).to_px(density), 10.0);
        assert_eq!(Dp::from_px(10.0, density), Dp(4.0));
    }
}
