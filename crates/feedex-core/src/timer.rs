//! Single-shot delayed callback slot.

use crate::runtime::{RuntimeHandle, TimerRegistration};

/// Holds at most one pending delayed callback.
///
/// Scheduling again replaces (and thereby cancels) the previous instance, so
/// a stale callback can never fire after it has been rescheduled.
#[derive(Default)]
pub struct TimerSlot {
    registration: Option<TimerRegistration>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending instance and schedules `task` after `delay_millis`.
    pub fn schedule(
        &mut self,
        runtime: &RuntimeHandle,
        delay_millis: u64,
        task: impl FnOnce() + 'static,
    ) {
        self.cancel();
        self.registration = Some(runtime.post_delayed(delay_millis, task));
    }

    /// Cancels the pending instance. Returns whether one was still pending.
    pub fn cancel(&mut self) -> bool {
        match self.registration.take() {
            Some(registration) => {
                let was_pending = registration.is_pending();
                registration.cancel();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.registration
            .as_ref()
            .map(TimerRegistration::is_pending)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultScheduler, Runtime};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    #[test]
    fn reschedule_invalidates_previous_instance() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let handle = runtime.handle();
        let fired = Rc::new(Cell::new(Vec::<u32>::new()));
        let mut slot = TimerSlot::new();

        let first = Rc::clone(&fired);
        slot.schedule(&handle, 300, move || {
            let mut v = first.take();
            v.push(1);
            first.set(v);
        });
        runtime.tick(200);
        let second = Rc::clone(&fired);
        slot.schedule(&handle, 300, move || {
            let mut v = second.take();
            v.push(2);
            second.set(v);
        });

        runtime.tick(350);
        assert!(fired.take().is_empty(), "first instance must not fire");
        assert!(slot.is_pending());

        runtime.tick(500);
        assert_eq!(fired.take(), vec![2]);
        assert!(!slot.is_pending());
    }

    #[test]
    fn cancel_reports_pending_state() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let mut slot = TimerSlot::new();
        assert!(!slot.cancel());

        slot.schedule(&runtime.handle(), 10, || {});
        assert!(slot.cancel());
        assert!(!slot.is_pending());
        assert!(!runtime.has_pending_work());
    }
}
