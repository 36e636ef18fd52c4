//! Gesture foundation: raw motion input and the recognizers built on it.

pub mod gesture_constants;
pub mod gestures;
pub mod input;

pub use gestures::{
    classify_fling, classify_pull, FlingDirection, FlingThresholds, GestureClassifier,
    GestureSignal,
};
pub use input::{GestureSession, MotionPhase, MotionSample, VelocityTracker1D};

pub mod prelude {
    pub use crate::gestures::{FlingDirection, FlingThresholds, GestureClassifier, GestureSignal};
    pub use crate::input::{MotionPhase, MotionSample};
}
