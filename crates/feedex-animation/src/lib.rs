//! Animation system for FeedEx gesture surfaces.

mod animation;
mod offset_animator;

pub use animation::*;
pub use offset_animator::*;

pub mod prelude {
    pub use crate::animation::{AnimationSpec, Easing};
    pub use crate::offset_animator::{AnimationSlot, AnimationTask, OffsetAnimator};
}
