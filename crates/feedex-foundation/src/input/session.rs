//! Per-touch-sequence bookkeeping.

use super::types::MotionSample;

/// Record of one live touch sequence, from `Down` to `Up`/`Cancel`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub start: MotionSample,
    pub last: MotionSample,
    /// Total distance travelled along each axis, regardless of direction.
    pub delta_accum: (f32, f32),
}

impl GestureSession {
    pub fn new(start: MotionSample) -> Self {
        Self {
            start,
            last: start,
            delta_accum: (0.0, 0.0),
        }
    }

    /// Folds `sample` into the session.
    pub fn update(&mut self, sample: MotionSample) {
        let (dx, dy) = sample.position - self.last.position;
        self.delta_accum.0 += dx.abs();
        self.delta_accum.1 += dy.abs();
        self.last = sample;
    }

    /// Net displacement of the latest sample from the press position.
    pub fn displacement(&self) -> (f32, f32) {
        self.last.position - self.start.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_tracks_net_and_travelled_distance() {
        let mut session = GestureSession::new(MotionSample::down(10.0, 10.0, 0));
        session.update(MotionSample::move_to(10.0, 40.0, 16));
        session.update(MotionSample::move_to(15.0, 30.0, 32));

        assert_eq!(session.displacement(), (5.0, 20.0));
        assert_eq!(session.delta_accum, (5.0, 40.0));
        assert_eq!(session.start.y(), 10.0);
    }
}
