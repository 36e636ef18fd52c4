//! Slot-based tween driver.
//!
//! An [`OffsetAnimator`] owns at most one running task per
//! [`AnimationSlot`]. Tasks advance once per frame through the runtime's
//! frame clock; starting a task in an occupied slot replaces the old one
//! without running its completion.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use feedex_core::{FrameCallbackRegistration, RuntimeHandle};
use smallvec::SmallVec;

use crate::animation::AnimationSpec;

/// Purpose of a running animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationSlot {
    /// Content offset travelling back to its resting top.
    OffsetReturn,
    /// Trigger percentage shrinking back to zero.
    PercentageShrink,
}

impl AnimationSlot {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            AnimationSlot::OffsetReturn => 0,
            AnimationSlot::PercentageShrink => 1,
        }
    }
}

type TickFn = Box<dyn FnMut(f32) + 'static>;
type CompleteFn = Box<dyn FnOnce() + 'static>;

/// A time-boxed interpolation from `from` to `to`.
pub struct AnimationTask {
    pub from: f32,
    pub to: f32,
    pub spec: AnimationSpec,
    on_tick: Option<TickFn>,
    on_complete: Option<CompleteFn>,
}

impl AnimationTask {
    pub fn new(from: f32, to: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            on_tick: None,
            on_complete: None,
        }
    }

    /// Called every frame with the interpolated value.
    pub fn on_tick(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.on_tick = Some(Box::new(callback));
        self
    }

    /// Called once, after the final tick, when the task reaches `to`.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Value after `elapsed_millis`, and whether the task has finished.
    pub fn sample(&self, elapsed_millis: u64) -> (f32, bool) {
        match self.spec.linear_progress(elapsed_millis) {
            None => (self.from, false),
            Some(linear) if linear >= 1.0 => (self.to, true),
            Some(linear) => {
                let progress = self.spec.easing.transform(linear);
                (self.from + (self.to - self.from) * progress, false)
            }
        }
    }
}

impl fmt::Debug for AnimationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationTask")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

struct RunningTask {
    slot: AnimationSlot,
    generation: u64,
    start_time_millis: Option<u64>,
    last_value: f32,
    task: AnimationTask,
}

struct AnimatorInner {
    runtime: RuntimeHandle,
    running: SmallVec<[RunningTask; AnimationSlot::COUNT]>,
    // Bumped on every start/cancel of a slot; a task whose generation no
    // longer matches has been replaced or voided.
    generations: [u64; AnimationSlot::COUNT],
    registration: Option<FrameCallbackRegistration>,
}

impl AnimatorInner {
    fn bump(&mut self, slot: AnimationSlot) -> u64 {
        let generation = &mut self.generations[slot.index()];
        *generation += 1;
        *generation
    }

    fn is_current(&self, slot: AnimationSlot, generation: u64) -> bool {
        self.generations[slot.index()] == generation
    }
}

/// Frame-driven interpolation engine with one task per [`AnimationSlot`].
#[derive(Clone)]
pub struct OffsetAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
}

impl OffsetAnimator {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                runtime,
                running: SmallVec::new(),
                generations: [0; AnimationSlot::COUNT],
                registration: None,
            })),
        }
    }

    /// Starts `task` in `slot`, replacing whatever ran there before.
    pub fn start(&self, slot: AnimationSlot, task: AnimationTask) {
        {
            let mut inner = self.inner.borrow_mut();
            let generation = inner.bump(slot);
            let replaced = inner.running.iter().position(|running| running.slot == slot);
            if let Some(index) = replaced {
                inner.running.remove(index);
                log::trace!("{slot:?} animation replaced");
            }
            let last_value = task.from;
            inner.running.push(RunningTask {
                slot,
                generation,
                start_time_millis: None,
                last_value,
                task,
            });
        }
        Self::schedule_frame(&self.inner);
    }

    /// Stops the task in `slot` without running its completion.
    /// Returns whether a task was running.
    pub fn cancel(&self, slot: AnimationSlot) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.bump(slot);
        let index = inner.running.iter().position(|running| running.slot == slot);
        let cancelled = index.map(|index| inner.running.remove(index)).is_some();
        if inner.running.is_empty() {
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
        }
        cancelled
    }

    /// Stops every task. No completion callback of a voided task ever runs,
    /// including tasks that are mid-frame when this is called.
    pub fn cancel_all(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.bump(AnimationSlot::OffsetReturn);
        inner.bump(AnimationSlot::PercentageShrink);
        inner.running.clear();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
    }

    pub fn is_running(&self, slot: AnimationSlot) -> bool {
        self.inner
            .borrow()
            .running
            .iter()
            .any(|running| running.slot == slot)
    }

    pub fn is_idle(&self) -> bool {
        self.inner.borrow().running.is_empty()
    }

    /// Last value emitted by the task in `slot`, if one is running.
    pub fn value(&self, slot: AnimationSlot) -> Option<f32> {
        self.inner
            .borrow()
            .running
            .iter()
            .find(|running| running.slot == slot)
            .map(|running| running.last_value)
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorInner>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.running.is_empty() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_millis(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatorInner>>, frame_time_millis: u64) {
        let batch = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            std::mem::take(&mut inner.running)
        };

        // Callbacks run with no borrow held so they may start or cancel
        // animations on this animator.
        let mut survivors: SmallVec<[RunningTask; AnimationSlot::COUNT]> = SmallVec::new();
        for mut running in batch {
            if !this.borrow().is_current(running.slot, running.generation) {
                continue;
            }
            let start = *running.start_time_millis.get_or_insert(frame_time_millis);
            let elapsed = frame_time_millis.saturating_sub(start);
            let (value, finished) = running.task.sample(elapsed);
            running.last_value = value;
            log::trace!(
                "{:?} tick at {}ms: {:.2} (finished: {})",
                running.slot,
                frame_time_millis,
                value,
                finished
            );
            if let Some(on_tick) = running.task.on_tick.as_mut() {
                on_tick(value);
            }
            if finished {
                // A tick callback may itself have voided this task.
                if this.borrow().is_current(running.slot, running.generation) {
                    if let Some(on_complete) = running.task.on_complete.take() {
                        on_complete();
                    }
                }
            } else {
                survivors.push(running);
            }
        }

        {
            let mut inner = this.borrow_mut();
            for running in survivors {
                let replaced = inner.running.iter().any(|other| other.slot == running.slot);
                if inner.is_current(running.slot, running.generation) && !replaced {
                    inner.running.push(running);
                }
            }
        }
        Self::schedule_frame(this);
    }
}

#[cfg(test)]
#[path = "tests/offset_animator_tests.rs"]
mod tests;
