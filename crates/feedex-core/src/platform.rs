//! Platform abstraction traits for runtime services.
//!
//! The host platform owns the real event loop. These traits let the runtime
//! ask it for frames without depending on any windowing API.

/// Schedules work for the runtime.
///
/// Implementations are responsible for making the host call
/// [`Runtime::tick`](crate::Runtime::tick) soon. They must be safe to use
/// from multiple threads because worker threads wake the UI thread through
/// the [`UiDispatcher`](crate::UiDispatcher).
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
