//! One-shot frame callbacks in runtime milliseconds.

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Schedules work for the next rendered frame.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `callback` once, on the next frame, with the frame time in
    /// milliseconds. Dropping the returned registration withdraws it.
    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }
}

/// Pending frame callback; `id` is `None` once it can no longer run.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    /// False when the runtime was already gone at registration time.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        self.withdraw();
    }

    fn withdraw(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.withdraw();
    }
}
