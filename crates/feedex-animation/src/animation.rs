//! Easing curves and tween specifications.
//!
//! The pull-to-refresh surface scales drag progress with an accelerating
//! curve and runs every return-to-rest animation on a decelerating one.

/// Maps a linear fraction in [0, 1] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Symmetric cubic-bezier S curve (0.42, 0, 0.58, 1).
    EaseInOut,
    /// `t^(2 * factor)`; a factor of 1.0 is the plain parabola.
    Accelerate(f32),
    /// `1 - (1 - t)^(2 * factor)`.
    Decelerate(f32),
}

impl Easing {
    /// Input outside [0, 1] is clamped.
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).y_at(t),
            Easing::Accelerate(factor) => t.powf(2.0 * factor),
            Easing::Decelerate(factor) => 1.0 - (1.0 - t).powf(2.0 * factor),
        }
    }
}

/// Cubic bezier from (0, 0) to (1, 1) in polynomial form.
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    x: [f32; 3],
    y: [f32; 3],
}

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: Self::coefficients(x1, x2),
            y: Self::coefficients(y1, y2),
        }
    }

    /// `[a, b, c]` of `((a * s + b) * s + c) * s`.
    fn coefficients(p1: f32, p2: f32) -> [f32; 3] {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        [1.0 - c - b, b, c]
    }

    fn eval([a, b, c]: [f32; 3], s: f32) -> f32 {
        ((a * s + b) * s + c) * s
    }

    fn slope([a, b, c]: [f32; 3], s: f32) -> f32 {
        (3.0 * a * s + 2.0 * b) * s + c
    }

    /// Curve height where the curve's x equals `x`.
    fn y_at(&self, x: f32) -> f32 {
        if x <= 0.0 || x >= 1.0 {
            return x;
        }
        Self::eval(self.y, self.param_for_x(x))
    }

    fn param_for_x(&self, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;
        let mut s = x;
        for _ in 0..8 {
            let error = Self::eval(self.x, s) - x;
            if error.abs() < EPSILON {
                return s;
            }
            let slope = Self::slope(self.x, s);
            if slope.abs() < EPSILON {
                break;
            }
            s = (s - error / slope).clamp(0.0, 1.0);
        }

        // x(s) is monotonic for control points inside the unit square.
        let (mut low, mut high) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..24 {
            let error = Self::eval(self.x, s) - x;
            if error.abs() < EPSILON {
                break;
            }
            if error > 0.0 {
                high = s;
            } else {
                low = s;
            }
            s = 0.5 * (low + high);
        }
        s
    }
}

/// A tween: eased interpolation over a fixed duration after an optional
/// delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Linear progress in [0, 1] after `elapsed_millis`, accounting for the
    /// start delay. Returns `None` while still inside the delay.
    pub fn linear_progress(&self, elapsed_millis: u64) -> Option<f32> {
        if elapsed_millis < self.delay_millis {
            return None;
        }
        if self.duration_millis == 0 {
            return Some(1.0);
        }
        let running = elapsed_millis - self.delay_millis;
        Some((running as f32 / self.duration_millis as f32).min(1.0))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(400, Easing::Decelerate(1.0))
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
