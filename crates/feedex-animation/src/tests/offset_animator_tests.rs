use super::*;

use crate::animation::Easing;
use feedex_core::{DefaultScheduler, Runtime};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

fn runtime() -> Runtime {
    Runtime::new(Arc::new(DefaultScheduler))
}

fn recording_task(
    from: f32,
    to: f32,
    duration: u64,
    values: &Rc<RefCell<Vec<f32>>>,
    completed: &Rc<Cell<u32>>,
) -> AnimationTask {
    let values = Rc::clone(values);
    let completed = Rc::clone(completed);
    AnimationTask::new(from, to, AnimationSpec::linear(duration))
        .on_tick(move |value| values.borrow_mut().push(value))
        .on_complete(move || completed.set(completed.get() + 1))
}

#[test]
fn task_interpolates_and_completes_once() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    let values = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(Cell::new(0));

    animator.start(
        AnimationSlot::OffsetReturn,
        recording_task(100.0, 0.0, 100, &values, &completed),
    );
    assert!(animator.is_running(AnimationSlot::OffsetReturn));

    runtime.tick(0);
    runtime.tick(50);
    runtime.tick(100);
    runtime.tick(150);

    assert_eq!(values.borrow().as_slice(), &[100.0, 50.0, 0.0]);
    assert_eq!(completed.get(), 1);
    assert!(animator.is_idle());
    assert!(!runtime.needs_frame());
}

#[test]
fn decelerating_return_moves_fastest_at_start() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);

    animator.start(
        AnimationSlot::OffsetReturn,
        AnimationTask::new(80.0, 0.0, AnimationSpec::tween(400, Easing::Decelerate(2.0)))
            .on_tick(move |value| sink.borrow_mut().push(value)),
    );
    for frame in 0..=25 {
        runtime.tick(frame * 16);
    }

    let values = values.borrow();
    let first_step = values[0] - values[1];
    let late_step = values[20] - values[21];
    assert!(first_step > late_step);
    assert_eq!(*values.last().unwrap(), 0.0);
}

#[test]
fn restarting_a_slot_drops_the_previous_completion() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    let values = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    animator.start(
        AnimationSlot::OffsetReturn,
        recording_task(0.0, 10.0, 100, &values, &first),
    );
    runtime.tick(0);
    runtime.tick(40);
    animator.start(
        AnimationSlot::OffsetReturn,
        recording_task(4.0, 0.0, 100, &values, &second),
    );
    for time in [50, 100, 150, 200] {
        runtime.tick(time);
    }

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn slots_run_concurrently() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    let values = Rc::new(RefCell::new(Vec::new()));
    let offset_done = Rc::new(Cell::new(0));
    let shrink_done = Rc::new(Cell::new(0));

    animator.start(
        AnimationSlot::OffsetReturn,
        recording_task(50.0, 0.0, 100, &values, &offset_done),
    );
    animator.start(
        AnimationSlot::PercentageShrink,
        recording_task(0.8, 0.0, 200, &values, &shrink_done),
    );
    runtime.tick(0);
    runtime.tick(100);
    assert_eq!(offset_done.get(), 1);
    assert!(animator.is_running(AnimationSlot::PercentageShrink));
    assert_eq!(animator.value(AnimationSlot::PercentageShrink), Some(0.4));

    runtime.tick(200);
    assert_eq!(shrink_done.get(), 1);
    assert!(animator.is_idle());
}

#[test]
fn cancel_all_voids_pending_completions() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    let values = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(Cell::new(0));

    animator.start(
        AnimationSlot::OffsetReturn,
        recording_task(10.0, 0.0, 100, &values, &completed),
    );
    runtime.tick(0);
    animator.cancel_all();
    runtime.tick(100);
    runtime.tick(200);

    assert_eq!(completed.get(), 0);
    assert_eq!(values.borrow().len(), 1);
    assert!(!runtime.needs_frame());
}

#[test]
fn completion_may_cancel_its_sibling_mid_frame() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    let values = Rc::new(RefCell::new(Vec::new()));
    let sibling_done = Rc::new(Cell::new(0));

    let canceller = animator.clone();
    animator.start(
        AnimationSlot::OffsetReturn,
        AnimationTask::new(1.0, 0.0, AnimationSpec::linear(0))
            .on_complete(move || canceller.cancel_all()),
    );
    animator.start(
        AnimationSlot::PercentageShrink,
        recording_task(1.0, 0.0, 0, &values, &sibling_done),
    );
    runtime.tick(0);

    assert_eq!(sibling_done.get(), 0);
    assert!(values.borrow().is_empty());
    assert!(animator.is_idle());
}

#[test]
fn cancel_reports_whether_slot_was_busy() {
    let runtime = runtime();
    let animator = OffsetAnimator::new(runtime.handle());
    assert!(!animator.cancel(AnimationSlot::OffsetReturn));
    animator.start(
        AnimationSlot::OffsetReturn,
        AnimationTask::new(0.0, 1.0, AnimationSpec::linear(100)),
    );
    assert!(animator.cancel(AnimationSlot::OffsetReturn));
    assert!(animator.is_idle());
}
