//! Core runtime for FeedEx gesture surfaces.
//!
//! Everything in this crate runs on one UI thread. The host drives the
//! runtime by calling [`Runtime::tick`] once per render frame; "waiting" is
//! modelled as timers and frame callbacks, never as thread blocking.

mod frame_clock;
mod platform;
mod runtime;
mod timer;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle, TimerRegistration, UiDispatcher};
pub use timer::TimerSlot;

pub type FrameCallbackId = u64;
pub type TimerId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::platform::RuntimeScheduler;
    pub use crate::runtime::{Runtime, RuntimeHandle, TimerRegistration, UiDispatcher};
    pub use crate::timer::TimerSlot;
}
