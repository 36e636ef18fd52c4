//! Vertical pull recogniser.

use crate::input::GestureSession;

/// Downward pull distance of the session's latest sample, if the motion is
/// predominantly vertical and clears `touch_slop`.
///
/// Upward, sideways and sub-slop movement yields `None`, so the slop acts as
/// a dead zone.
pub fn classify_pull(session: &GestureSession, touch_slop: f32) -> Option<f32> {
    let (x_diff, y_diff) = session.displacement();
    if y_diff.abs() < x_diff.abs() {
        return None;
    }
    (y_diff > touch_slop).then_some(y_diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MotionSample;

    fn session_to(x: f32, y: f32) -> GestureSession {
        let mut session = GestureSession::new(MotionSample::down(100.0, 50.0, 0));
        session.update(MotionSample::move_to(x, y, 16));
        session
    }

    #[test]
    fn downward_motion_past_slop_is_a_pull() {
        assert_eq!(classify_pull(&session_to(100.0, 250.0), 10.0), Some(200.0));
    }

    #[test]
    fn slop_is_a_dead_zone() {
        assert_eq!(classify_pull(&session_to(100.0, 60.0), 10.0), None);
        assert_eq!(classify_pull(&session_to(100.0, 61.0), 10.0), Some(11.0));
    }

    #[test]
    fn upward_motion_is_ignored() {
        assert_eq!(classify_pull(&session_to(100.0, 0.0), 10.0), None);
    }

    #[test]
    fn horizontal_dominance_is_not_a_pull() {
        assert_eq!(classify_pull(&session_to(250.0, 90.0), 10.0), None);
    }
}
