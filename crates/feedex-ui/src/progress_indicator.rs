//! Progress bar drawn along the top edge of a pull-to-refresh surface.
//!
//! The indicator never paints itself. [`ProgressIndicator::frame`] describes
//! what the host should draw for a given time: nothing, the trigger bar that
//! grows with the pull, or the indeterminate colour sweep shown while a
//! refresh runs and for a short finishing period after it stops.

use feedex_animation::Easing;
use feedex_ui_graphics::{Color, Rect};
use smallvec::SmallVec;

/// Length of one full indeterminate colour cycle.
pub const SWEEP_CYCLE_MS: u64 = 2000;

/// Time the sweep keeps running after `stop` while it clears from the centre.
pub const FINISH_ANIMATION_MS: u64 = 1000;

const BAND_EASING: Easing = Easing::EaseInOut;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScheme(pub [Color; 4]);

impl ColorScheme {
    pub fn new(c1: Color, c2: Color, c3: Color, c4: Color) -> Self {
        Self([c1, c2, c3, c4])
    }

    /// Colour `index` in 1..=4, wrapping.
    fn color(&self, index: usize) -> Color {
        self.0[(index + 3) % 4]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new(
            Color::from_argb(0xB300_0000),
            Color::from_argb(0x8000_0000),
            Color::from_argb(0x4D00_0000),
            Color::from_argb(0x1A00_0000),
        )
    }
}

/// One expanding colour band of the sweep, centred horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepBand {
    pub color: Color,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub enum IndicatorFrame {
    Hidden,
    /// Bar centred in the bounds, as wide as the trigger percentage.
    Trigger { bar: Rect, color: Color },
    /// Indeterminate sweep. `clear` is the centred region erased while the
    /// finishing animation runs.
    Sweep {
        bounds: Rect,
        background: Color,
        bands: SmallVec<[SweepBand; 3]>,
        clear: Option<Rect>,
    },
}

#[derive(Debug)]
pub struct ProgressIndicator {
    colors: ColorScheme,
    bounds: Rect,
    trigger_percentage: f32,
    running: bool,
    start_time_ms: u64,
    finish_time_ms: Option<u64>,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self {
            colors: ColorScheme::default(),
            bounds: Rect::default(),
            trigger_percentage: 0.0,
            running: false,
            start_time_ms: 0,
            finish_time_ms: None,
        }
    }

    /// Sets the pull progress shown while not refreshing; clamped to [0, 1].
    pub fn set_trigger_percentage(&mut self, percentage: f32) {
        self.trigger_percentage = percentage.clamp(0.0, 1.0);
    }

    pub fn trigger_percentage(&self) -> f32 {
        self.trigger_percentage
    }

    /// Enters the indeterminate sweep. No-op while already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }
        self.trigger_percentage = 0.0;
        self.start_time_ms = now_ms;
        self.finish_time_ms = None;
        self.running = true;
        true
    }

    /// Leaves the sweep, starting the finishing animation. No-op unless
    /// running, so a repeated stop never restarts the finish.
    pub fn stop(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.trigger_percentage = 0.0;
        self.finish_time_ms = Some(now_ms);
        self.running = false;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether successive frames differ, so the host should keep drawing.
    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.running || self.is_finishing(now_ms)
    }

    pub fn set_color_scheme(&mut self, colors: ColorScheme) {
        self.colors = colors;
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.colors
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_finishing(&self, now_ms: u64) -> bool {
        self.finish_time_ms
            .is_some_and(|finish| now_ms.saturating_sub(finish) < FINISH_ANIMATION_MS)
    }

    pub fn frame(&mut self, now_ms: u64) -> IndicatorFrame {
        if self.bounds.width <= 0.0 || self.bounds.height <= 0.0 {
            return IndicatorFrame::Hidden;
        }

        let mut clear = None;
        if !self.running {
            match self.finish_time_ms {
                Some(_) if self.is_finishing(now_ms) => {}
                Some(_) => {
                    self.finish_time_ms = None;
                    return IndicatorFrame::Hidden;
                }
                None => return self.trigger_frame(),
            }
        }
        if let Some(finish) = self.finish_time_ms {
            let progress = now_ms.saturating_sub(finish) as f32 / FINISH_ANIMATION_MS as f32;
            let half_width = self.bounds.width / 2.0 * progress;
            let center = self.bounds.center();
            clear = Some(Rect::new(
                center.x - half_width,
                self.bounds.y,
                half_width * 2.0,
                self.bounds.height,
            ));
        }

        let elapsed = now_ms.saturating_sub(self.start_time_ms);
        let iterations = elapsed / SWEEP_CYCLE_MS;
        let raw = (elapsed % SWEEP_CYCLE_MS) as f32 / SWEEP_CYCLE_MS as f32 * 100.0;

        let background = if iterations == 0 {
            Color::TRANSPARENT
        } else if raw < 25.0 {
            self.colors.color(4)
        } else if raw < 50.0 {
            self.colors.color(1)
        } else if raw < 75.0 {
            self.colors.color(2)
        } else {
            self.colors.color(3)
        };

        let mut bands = SmallVec::new();
        let phases = [
            (0.0, 25.0, 25.0, 1),
            (0.0, 50.0, 0.0, 2),
            (25.0, 75.0, -25.0, 3),
            (50.0, 100.0, -50.0, 4),
            (75.0, 100.0, -75.0, 1),
        ];
        for (from, to, shift, color) in phases {
            if raw >= from && raw <= to {
                let fraction = ((raw + shift) * 2.0 / 100.0).clamp(0.0, 1.0);
                bands.push(self.band(color, fraction));
            }
        }

        IndicatorFrame::Sweep {
            bounds: self.bounds,
            background,
            bands,
            clear,
        }
    }

    fn trigger_frame(&self) -> IndicatorFrame {
        if self.trigger_percentage <= 0.0 {
            return IndicatorFrame::Hidden;
        }
        let width = self.bounds.width * self.trigger_percentage;
        let center_x = self.bounds.center().x;
        IndicatorFrame::Trigger {
            bar: Rect::new(
                center_x - width / 2.0,
                self.bounds.y,
                width,
                self.bounds.height,
            ),
            color: self.colors.color(1),
        }
    }

    fn band(&self, color: usize, fraction: f32) -> SweepBand {
        let width = self.bounds.width * BAND_EASING.transform(fraction);
        let center_x = self.bounds.center().x;
        SweepBand {
            color: self.colors.color(color),
            rect: Rect::new(center_x - width / 2.0, self.bounds.y, width, self.bounds.height),
        }
    }
}

#[cfg(test)]
#[path = "tests/progress_indicator_tests.rs"]
mod tests;
