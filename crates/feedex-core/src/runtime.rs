use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use web_time::Instant;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::{FrameCallbackId, TimerId};

type SendTask = Box<dyn FnOnce() + Send + 'static>;
type LocalTask = Box<dyn FnOnce() + 'static>;

/// Sending half of the UI-thread mailbox, shared by every dispatcher clone.
struct Mailbox {
    scheduler: Arc<dyn RuntimeScheduler>,
    tx: mpsc::Sender<SendTask>,
    // Sent but not yet run.
    in_flight: AtomicUsize,
}

impl Mailbox {
    fn send(&self, task: SendTask) {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        match self.tx.send(task) {
            Ok(()) => self.scheduler.schedule_frame(),
            // Receiver dropped with the runtime: the task is discarded.
            Err(_) => self.settle(),
        }
    }

    fn settle(&self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }

    fn has_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) != 0
    }
}

/// Cross-thread entry point into the UI thread.
///
/// Worker threads (for example the one persisting a toggled read flag) use
/// this to hand results back. Posted closures run at the start of the next
/// [`Runtime::tick`]; nothing on the UI thread ever waits for them.
#[derive(Clone)]
pub struct UiDispatcher {
    mailbox: Arc<Mailbox>,
}

impl UiDispatcher {
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.mailbox.send(Box::new(task));
    }

    /// Whether any posted task has not run yet.
    pub fn has_pending(&self) -> bool {
        self.mailbox.has_pending()
    }
}

type FrameTask = Box<dyn FnOnce(u64) + 'static>;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    now_millis: Cell<u64>,
    started_at: Instant,
    // Ids grow monotonically, so key order is registration order.
    frame_callbacks: RefCell<BTreeMap<FrameCallbackId, FrameTask>>,
    next_frame_callback_id: Cell<u64>,
    // Keyed by (due time, id) so equal deadlines fire in registration order.
    timers: RefCell<BTreeMap<(u64, TimerId), LocalTask>>,
    timer_deadlines: RefCell<FxHashMap<TimerId, u64>>,
    next_timer_id: Cell<u64>,
    mailbox: Arc<Mailbox>,
    inbox: mpsc::Receiver<SendTask>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let (tx, inbox) = mpsc::channel();
        let mailbox = Arc::new(Mailbox {
            scheduler: Arc::clone(&scheduler),
            tx,
            in_flight: AtomicUsize::new(0),
        });
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            now_millis: Cell::new(0),
            started_at: Instant::now(),
            frame_callbacks: RefCell::new(BTreeMap::new()),
            next_frame_callback_id: Cell::new(1),
            timers: RefCell::new(BTreeMap::new()),
            timer_deadlines: RefCell::new(FxHashMap::default()),
            next_timer_id: Cell::new(1),
            mailbox,
            inbox,
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn has_pending_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: FrameTask) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().insert(id, callback);
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let removed = self.frame_callbacks.borrow_mut().remove(&id);
        // Dropped outside the borrow: the closure may own registrations.
        drop(removed);
        self.refresh_needs_frame();
    }

    fn post_delayed(&self, delay_millis: u64, task: LocalTask) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let due = self.now_millis.get().saturating_add(delay_millis);
        self.timers.borrow_mut().insert((due, id), task);
        self.timer_deadlines.borrow_mut().insert(id, due);
        self.schedule();
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        let due = self.timer_deadlines.borrow_mut().remove(&id);
        if let Some(due) = due {
            self.timers.borrow_mut().remove(&(due, id));
        }
        self.refresh_needs_frame();
    }

    fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timer_deadlines.borrow().contains_key(&id)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.borrow().keys().next().map(|(due, _)| *due)
    }

    fn drain_ui(&self) {
        while let Ok(task) = self.inbox.try_recv() {
            task();
            self.mailbox.settle();
        }
    }

    fn run_due_timers(&self, now: u64) {
        // Snapshot first: anything posted by these callbacks runs next tick.
        let due: SmallVec<[(TimerId, LocalTask); 4]> = {
            let mut timers = self.timers.borrow_mut();
            let later = timers.split_off(&(now.saturating_add(1), 0));
            let expired = std::mem::replace(&mut *timers, later);
            drop(timers);
            let mut deadlines = self.timer_deadlines.borrow_mut();
            expired
                .into_iter()
                .map(|((_, id), task)| {
                    deadlines.remove(&id);
                    (id, task)
                })
                .collect()
        };
        for (id, task) in due {
            log::trace!("timer {id} fired at {now}ms");
            task();
        }
    }

    fn drain_frame_callbacks(&self, frame_time_millis: u64) {
        // Callbacks registered while these run wait for the next frame.
        let batch = std::mem::take(&mut *self.frame_callbacks.borrow_mut());
        for callback in batch.into_values() {
            callback(frame_time_millis);
        }
    }

    fn refresh_needs_frame(&self) {
        let idle = self
            .frame_callbacks
            .try_borrow()
            .map(|callbacks| callbacks.is_empty())
            .unwrap_or(false)
            && self
                .timers
                .try_borrow()
                .map(|timers| timers.is_empty())
                .unwrap_or(false)
            && !self.mailbox.has_pending();
        if idle {
            self.needs_frame.set(false);
        }
    }

    fn tick(&self, now_millis: u64) {
        let previous = self.now_millis.get();
        let now = if now_millis < previous {
            log::warn!("runtime tick went backwards ({now_millis}ms < {previous}ms); clamping");
            previous
        } else {
            now_millis
        };
        self.now_millis.set(now);
        self.needs_frame.set(false);
        self.drain_ui();
        self.run_due_timers(now);
        self.drain_frame_callbacks(now);
        if self.has_frame_callbacks() || self.mailbox.has_pending() {
            self.needs_frame.set(true);
        }
    }
}

/// Owner of the UI-thread runtime state.
///
/// Dropping the `Runtime` voids every outstanding registration: handles keep
/// only a weak reference and silently do nothing afterwards.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
            dispatcher: UiDispatcher {
                mailbox: Arc::clone(&self.inner.mailbox),
            },
        }
    }

    /// Advances the runtime clock to `now_millis` and runs one tick:
    /// cross-thread messages, then due timers and posted tasks, then frame
    /// callbacks.
    pub fn tick(&self, now_millis: u64) {
        self.inner.tick(now_millis);
    }

    /// Ticks using the monotonic wall clock measured from runtime creation.
    pub fn tick_now(&self) {
        let elapsed = self.inner.started_at.elapsed().as_millis() as u64;
        self.inner.tick(elapsed);
    }

    /// Advances the clock by `delta_millis` and ticks once.
    pub fn advance_by(&self, delta_millis: u64) {
        let now = self.inner.now_millis.get().saturating_add(delta_millis);
        self.inner.tick(now);
    }

    pub fn now_millis(&self) -> u64 {
        self.inner.now_millis.get()
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get() || self.inner.mailbox.has_pending()
    }

    /// Earliest deadline among pending timers, for hosts that sleep until
    /// the next piece of scheduled work.
    pub fn next_deadline(&self) -> Option<u64> {
        self.inner.next_deadline()
    }

    pub fn has_pending_work(&self) -> bool {
        self.inner.has_frame_callbacks()
            || self.inner.has_pending_timers()
            || self.inner.mailbox.has_pending()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    dispatcher: UiDispatcher,
}

impl RuntimeHandle {
    /// Asks the host for another frame.
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn now_millis(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_millis.get())
            .unwrap_or(0)
    }

    /// Runs `task` on the next tick, never inline.
    pub fn post(&self, task: impl FnOnce() + 'static) -> TimerRegistration {
        self.post_delayed(0, task)
    }

    /// Runs `task` on the first tick at or after `now + delay_millis`.
    pub fn post_delayed(
        &self,
        delay_millis: u64,
        task: impl FnOnce() + 'static,
    ) -> TimerRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.post_delayed(delay_millis, Box::new(task));
                TimerRegistration::new(self.clone(), id)
            }
            None => TimerRegistration::inactive(self.clone()),
        }
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_timer(id);
        }
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn dispatcher(&self) -> UiDispatcher {
        self.dispatcher.clone()
    }
}

/// Handle to a posted or delayed task. Cancels the task when dropped.
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    fn new(runtime: RuntimeHandle, id: TimerId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    /// True while the task has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.id
            .map(|id| self.runtime.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
