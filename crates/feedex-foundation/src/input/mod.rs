pub mod session;
pub mod types;
pub mod velocity_tracker;

pub use session::GestureSession;
pub use types::{MotionPhase, MotionSample};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use super::types::{MotionPhase, MotionSample};
}
