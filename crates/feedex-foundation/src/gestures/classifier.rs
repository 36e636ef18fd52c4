//! Turns a raw motion stream into gesture signals.
//!
//! One classifier serves one input surface. It owns the single live
//! [`GestureSession`] and the horizontal velocity history; pull signals are
//! produced on `Move`, fling signals only on `Up`.

use feedex_ui_graphics::Point;

use super::fling::{FlingDirection, FlingThresholds};
use super::pull::classify_pull;
use crate::gesture_constants::TOUCH_SLOP;
use crate::input::{GestureSession, MotionPhase, MotionSample, VelocityTracker1D};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    None,
    /// Downward pull past the slop, in pixels from the press position.
    PullProgress(f32),
    /// Pull travelled past the trigger distance.
    PullTrigger,
    /// Completed horizontal fling that passed the velocity and off-path
    /// checks. `direction` is `None` when it travelled too little to toggle.
    FlingToggle {
        direction: Option<FlingDirection>,
        velocity: f32,
        start: Point,
        end: Point,
    },
}

pub struct GestureClassifier {
    session: Option<GestureSession>,
    velocity_x: VelocityTracker1D,
    touch_slop: f32,
    trigger_distance: Option<f32>,
    fling: FlingThresholds,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(TOUCH_SLOP, FlingThresholds::default())
    }
}

impl GestureClassifier {
    pub fn new(touch_slop: f32, fling: FlingThresholds) -> Self {
        Self {
            session: None,
            velocity_x: VelocityTracker1D::new(),
            touch_slop,
            trigger_distance: None,
            fling,
        }
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    /// Pulls beyond `distance` report [`GestureSignal::PullTrigger`]. Until a
    /// distance is known every pull reports progress.
    pub fn set_trigger_distance(&mut self, distance: Option<f32>) {
        self.trigger_distance = distance;
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn reset(&mut self) {
        self.session = None;
        self.velocity_x.reset();
    }

    pub fn classify(&mut self, sample: &MotionSample) -> GestureSignal {
        let signal = match sample.phase {
            MotionPhase::Down => {
                if self.session.is_some() {
                    log::warn!(
                        "down at ({:.1}, {:.1}) while a gesture session is live; resetting",
                        sample.x(),
                        sample.y()
                    );
                    self.reset();
                }
                self.velocity_x.add_data_point(sample.time_ms, sample.x());
                self.session = Some(GestureSession::new(*sample));
                GestureSignal::None
            }
            MotionPhase::Move => {
                let Some(session) = self.session.as_mut() else {
                    return GestureSignal::None;
                };
                session.update(*sample);
                self.velocity_x.add_data_point(sample.time_ms, sample.x());
                match classify_pull(session, self.touch_slop) {
                    Some(y_diff) if self.trigger_distance.is_some_and(|t| y_diff > t) => {
                        GestureSignal::PullTrigger
                    }
                    Some(y_diff) => GestureSignal::PullProgress(y_diff),
                    None => GestureSignal::None,
                }
            }
            MotionPhase::Up => {
                let Some(mut session) = self.session.take() else {
                    return GestureSignal::None;
                };
                session.update(*sample);
                self.velocity_x.add_data_point(sample.time_ms, sample.x());
                let velocity = self.velocity_x.calculate_velocity();
                self.velocity_x.reset();
                let start = session.start.position;
                let end = session.last.position;
                if self.fling.accepts(start, end, velocity) {
                    GestureSignal::FlingToggle {
                        direction: self.fling.direction(start, end),
                        velocity,
                        start,
                        end,
                    }
                } else {
                    GestureSignal::None
                }
            }
            MotionPhase::Cancel => {
                self.reset();
                GestureSignal::None
            }
        };
        log::trace!("{:?} at {}ms -> {:?}", sample.phase, sample.time_ms, signal);
        signal
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
