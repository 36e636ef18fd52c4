//! Fling-to-toggle over list rows.
//!
//! A fast leftward fling over a row toggles its read state, a rightward one
//! its favourite state. After a fling lands on a row, a synthesized `Cancel`
//! sample is delivered on the next runtime tick to clear the row's pressed
//! highlight without re-entering event delivery.

use std::cell::RefCell;
use std::rc::Rc;

use feedex_core::{RuntimeHandle, TimerSlot};
use feedex_foundation::{FlingDirection, FlingThresholds, GestureClassifier, GestureSignal, MotionSample};
use feedex_ui_graphics::{Point, Rect};

use super::config::ItemToggleConfig;
use crate::host::{RowId, RowLayout, ToggleHandler};

/// The row a fling resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleTarget {
    pub row_id: RowId,
    pub row_bounds: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlingOutcome {
    /// Too slow or too far off the horizontal path.
    Ignored,
    /// No row under the end point.
    Dropped,
    /// Landed on a row without travelling far enough to toggle.
    Absorbed(ToggleTarget),
    Toggled {
        direction: FlingDirection,
        target: ToggleTarget,
    },
}

impl FlingOutcome {
    /// Whether the fling was consumed by a row.
    pub fn is_consumed(&self) -> bool {
        matches!(self, FlingOutcome::Absorbed(_) | FlingOutcome::Toggled { .. })
    }
}

type CancelSink = Rc<dyn Fn(MotionSample)>;

struct DispatcherInner {
    runtime: RuntimeHandle,
    thresholds: FlingThresholds,
    classifier: GestureClassifier,
    rows: Rc<dyn RowLayout>,
    handler: Rc<dyn ToggleHandler>,
    cancel_sink: Option<CancelSink>,
    highlight_reset: TimerSlot,
    attached: bool,
}

#[derive(Clone)]
pub struct ItemToggleDispatcher {
    inner: Rc<RefCell<DispatcherInner>>,
}

impl ItemToggleDispatcher {
    pub fn new(
        runtime: RuntimeHandle,
        rows: Rc<dyn RowLayout>,
        handler: Rc<dyn ToggleHandler>,
        config: ItemToggleConfig,
    ) -> Self {
        let thresholds = config.scaled_thresholds();
        let inner = DispatcherInner {
            runtime,
            thresholds,
            classifier: GestureClassifier::new(config.scaled_touch_slop(), thresholds),
            rows,
            handler,
            cancel_sink: None,
            highlight_reset: TimerSlot::new(),
            attached: true,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Receives the synthesized `Cancel` sample that clears row highlights.
    pub fn set_cancel_sink(&self, sink: impl Fn(MotionSample) + 'static) {
        self.inner.borrow_mut().cancel_sink = Some(Rc::new(sink));
    }

    pub fn is_highlight_reset_pending(&self) -> bool {
        self.inner.borrow().highlight_reset.is_pending()
    }

    /// Feeds one raw sample; returns whether a completed fling was consumed.
    pub fn on_touch_event(&self, sample: &MotionSample) -> bool {
        let signal = {
            let mut inner = self.inner.borrow_mut();
            if !inner.attached {
                return false;
            }
            inner.classifier.classify(sample)
        };
        match signal {
            GestureSignal::FlingToggle {
                velocity,
                start,
                end,
                ..
            } => self.on_fling(start, end, velocity).is_consumed(),
            _ => false,
        }
    }

    /// Resolves a completed fling with an externally measured horizontal
    /// velocity.
    pub fn on_fling(&self, start: Point, end: Point, velocity_x: f32) -> FlingOutcome {
        let (thresholds, rows, handler) = {
            let inner = self.inner.borrow();
            if !inner.attached {
                return FlingOutcome::Ignored;
            }
            (
                inner.thresholds,
                Rc::clone(&inner.rows),
                Rc::clone(&inner.handler),
            )
        };
        if !thresholds.accepts(start, end, velocity_x) {
            return FlingOutcome::Ignored;
        }

        let point = end.round();
        let target = rows.row_at(point).and_then(|row_id| {
            rows.row_bounds(row_id).map(|row_bounds| ToggleTarget { row_id, row_bounds })
        });
        let Some(target) = target else {
            log::debug!("fling at ({}, {}) dropped: no row", point.x, point.y);
            return FlingOutcome::Dropped;
        };

        let outcome = match thresholds.direction(start, end) {
            Some(direction) => {
                match direction {
                    FlingDirection::Left => handler.toggle_read(target.row_id),
                    FlingDirection::Right => handler.toggle_favorite(target.row_id),
                }
                log::debug!("fling {direction:?} toggled row {}", target.row_id);
                FlingOutcome::Toggled { direction, target }
            }
            None => FlingOutcome::Absorbed(target),
        };
        self.schedule_highlight_reset();
        outcome
    }

    fn schedule_highlight_reset(&self) {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        let runtime = inner.runtime.clone();
        inner.highlight_reset.schedule(&runtime, 0, move || {
            let Some(strong) = weak.upgrade() else {
                return;
            };
            let (sink, now) = {
                let inner = strong.borrow();
                (inner.cancel_sink.clone(), inner.runtime.now_millis())
            };
            if let Some(sink) = sink {
                sink(MotionSample::cancel(0.0, 0.0, now));
            }
        });
    }

    pub fn on_attached(&self) {
        self.inner.borrow_mut().attached = true;
    }

    /// Drops any pending highlight reset and the live session.
    pub fn on_detached(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.attached = false;
        inner.highlight_reset.cancel();
        inner.classifier.reset();
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
