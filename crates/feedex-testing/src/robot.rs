//! Robot-style driver for gesture surfaces.
//!
//! A [`GestureRobot`] owns a [`Runtime`] on a virtual clock and feeds
//! timestamped [`MotionSample`]s to the surfaces under test, ticking the
//! runtime between samples the way a host's frame loop would.
//!
//! # Example
//!
//! ```ignore
//! use feedex_testing::robot::GestureRobot;
//!
//! let mut robot = GestureRobot::new();
//! let controller = PullRefreshController::new(robot.handle(), config);
//! robot.drive_refresh(controller.clone());
//!
//! robot.drag((100.0, 50.0), (100.0, 400.0), 10);
//! robot.wait_for_idle();
//! ```

use std::sync::Arc;

use feedex_core::{DefaultScheduler, Runtime, RuntimeHandle};
use feedex_foundation::MotionSample;
use feedex_ui::{ItemToggleDispatcher, PullRefreshController};
use feedex_ui_graphics::Point;

/// Frame interval used when nothing else is configured.
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Upper bound on frames pumped by [`GestureRobot::wait_for_idle`].
const MAX_IDLE_FRAMES: usize = 10_000;

enum Surface {
    Refresh(PullRefreshController),
    Rows(ItemToggleDispatcher),
}

impl Surface {
    fn deliver(&self, sample: &MotionSample) -> bool {
        match self {
            Surface::Refresh(controller) => match controller.on_intercept_touch_event(sample) {
                Ok(handled) => handled,
                Err(err) => panic!("refresh surface rejected {:?}: {err}", sample.phase),
            },
            Surface::Rows(dispatcher) => dispatcher.on_touch_event(sample),
        }
    }
}

pub struct GestureRobot {
    runtime: Runtime,
    surfaces: Vec<Surface>,
    frame_ms: u64,
    pointer: Point,
}

impl Default for GestureRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRobot {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
            surfaces: Vec::new(),
            frame_ms: DEFAULT_FRAME_MS,
            pointer: Point::ZERO,
        }
    }

    /// Spacing between successive move samples and idle frames.
    pub fn with_frame_interval(mut self, frame_ms: u64) -> Self {
        self.frame_ms = frame_ms.max(1);
        self
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn now_ms(&self) -> u64 {
        self.runtime.now_millis()
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Routes samples to a pull-to-refresh surface through its intercept hook.
    pub fn drive_refresh(&mut self, controller: PullRefreshController) {
        self.surfaces.push(Surface::Refresh(controller));
    }

    /// Routes samples to a row dispatcher.
    pub fn drive_rows(&mut self, dispatcher: ItemToggleDispatcher) {
        self.surfaces.push(Surface::Rows(dispatcher));
    }

    /// Delivers `sample` to every driven surface in registration order.
    /// Returns whether any surface handled it.
    pub fn send(&mut self, sample: MotionSample) -> bool {
        self.pointer = sample.position;
        let mut handled = false;
        for surface in &self.surfaces {
            handled |= surface.deliver(&sample);
        }
        handled
    }

    pub fn down(&mut self, x: f32, y: f32) -> bool {
        let now = self.now_ms();
        self.send(MotionSample::down(x, y, now))
    }

    /// Advances one frame, then moves the pointer.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.advance_frame();
        let now = self.now_ms();
        self.send(MotionSample::move_to(x, y, now))
    }

    /// Lifts the pointer where it currently is.
    pub fn up(&mut self) -> bool {
        let Point { x, y } = self.pointer;
        let now = self.now_ms();
        self.send(MotionSample::up(x, y, now))
    }

    pub fn cancel(&mut self) -> bool {
        let Point { x, y } = self.pointer;
        let now = self.now_ms();
        self.send(MotionSample::cancel(x, y, now))
    }

    /// Presses at `from`, moves to `to` in `steps` evenly spaced frames and
    /// keeps holding. Returns whether any move was handled.
    pub fn press_and_drag(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) -> bool {
        self.down(from.0, from.1);
        let steps = steps.max(1);
        let mut handled = false;
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            handled |= self.move_to(x, y);
        }
        handled
    }

    /// A full press, drag and release.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) -> bool {
        let moved = self.press_and_drag(from, to, steps);
        let released = self.up();
        moved || released
    }

    /// A quick swipe from `from` to `to` lasting roughly `duration_ms`,
    /// sampled every 8 ms. Returns whether the release was handled.
    pub fn fling(&mut self, from: (f32, f32), to: (f32, f32), duration_ms: u64) -> bool {
        const SAMPLE_MS: u64 = 8;
        self.down(from.0, from.1);
        let steps = (duration_ms / SAMPLE_MS).max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.runtime.advance_by(SAMPLE_MS);
            let now = self.now_ms();
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.send(MotionSample::move_to(x, y, now));
        }
        self.up()
    }

    /// Ticks the runtime once, one frame later.
    pub fn advance_frame(&mut self) {
        self.runtime.advance_by(self.frame_ms);
    }

    /// Advances virtual time by `millis`, one frame at a time.
    pub fn advance_time(&mut self, millis: u64) {
        let end = self.now_ms().saturating_add(millis);
        while self.now_ms() < end {
            let step = self.frame_ms.min(end - self.now_ms());
            self.runtime.advance_by(step);
        }
    }

    /// Pumps frames until no timer, frame callback or posted task remains.
    ///
    /// Panics if the runtime never settles.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.runtime.has_pending_work() {
                return;
            }
            self.advance_frame();
        }
        panic!("runtime still busy after {MAX_IDLE_FRAMES} frames");
    }
}
