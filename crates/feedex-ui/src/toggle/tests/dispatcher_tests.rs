use super::*;

use feedex_core::{DefaultScheduler, Runtime};
use feedex_foundation::MotionPhase;
use std::sync::Arc;

const ROW_HEIGHT: f32 = 72.0;

struct Rows {
    count: i64,
}

impl RowLayout for Rows {
    fn row_at(&self, point: Point) -> Option<RowId> {
        let row = (point.y / ROW_HEIGHT).floor() as i64;
        (point.y >= 0.0 && row < self.count).then_some(row + 100)
    }

    fn row_bounds(&self, row: RowId) -> Option<Rect> {
        let index = row - 100;
        (0..self.count)
            .contains(&index)
            .then(|| Rect::new(0.0, index as f32 * ROW_HEIGHT, 480.0, ROW_HEIGHT))
    }
}

#[derive(Default)]
struct Toggles {
    calls: RefCell<Vec<(&'static str, RowId)>>,
}

impl ToggleHandler for Toggles {
    fn toggle_read(&self, row: RowId) {
        self.calls.borrow_mut().push(("read", row));
    }

    fn toggle_favorite(&self, row: RowId) {
        self.calls.borrow_mut().push(("favorite", row));
    }
}

struct Fixture {
    runtime: Runtime,
    dispatcher: ItemToggleDispatcher,
    toggles: Rc<Toggles>,
    cancels: Rc<RefCell<Vec<MotionSample>>>,
}

impl Fixture {
    fn new() -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let toggles = Rc::new(Toggles::default());
        let dispatcher = ItemToggleDispatcher::new(
            runtime.handle(),
            Rc::new(Rows { count: 5 }),
            toggles.clone(),
            ItemToggleConfig::default(),
        );
        let cancels = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&cancels);
        dispatcher.set_cancel_sink(move |sample| sink.borrow_mut().push(sample));
        Self {
            runtime,
            dispatcher,
            toggles,
            cancels,
        }
    }
}

#[test]
fn leftward_fling_toggles_read() {
    let fixture = Fixture::new();
    let outcome = fixture.dispatcher.on_fling(
        Point::new(300.0, 100.0),
        Point::new(170.0, 110.0),
        -200.0,
    );

    assert_eq!(
        outcome,
        FlingOutcome::Toggled {
            direction: FlingDirection::Left,
            target: ToggleTarget {
                row_id: 101,
                row_bounds: Rect::new(0.0, 72.0, 480.0, 72.0),
            },
        }
    );
    assert_eq!(fixture.toggles.calls.borrow().as_slice(), &[("read", 101)]);
}

#[test]
fn rightward_fling_toggles_favorite() {
    let fixture = Fixture::new();
    fixture
        .dispatcher
        .on_fling(Point::new(170.0, 100.0), Point::new(300.0, 110.0), -200.0);
    assert_eq!(fixture.toggles.calls.borrow().as_slice(), &[("favorite", 101)]);
}

#[test]
fn short_fling_is_absorbed_without_toggling() {
    let fixture = Fixture::new();
    let outcome = fixture
        .dispatcher
        .on_fling(Point::new(300.0, 100.0), Point::new(350.0, 110.0), 200.0);

    assert!(matches!(outcome, FlingOutcome::Absorbed(target) if target.row_id == 101));
    assert!(fixture.toggles.calls.borrow().is_empty());
    assert!(fixture.dispatcher.is_highlight_reset_pending());
}

#[test]
fn fling_outside_rows_is_dropped() {
    let fixture = Fixture::new();
    let outcome = fixture
        .dispatcher
        .on_fling(Point::new(300.0, 500.0), Point::new(100.0, 500.0), -900.0);

    assert_eq!(outcome, FlingOutcome::Dropped);
    assert!(fixture.toggles.calls.borrow().is_empty());
    assert!(!fixture.dispatcher.is_highlight_reset_pending());
}

#[test]
fn slow_fling_is_ignored() {
    let fixture = Fixture::new();
    let outcome = fixture
        .dispatcher
        .on_fling(Point::new(300.0, 100.0), Point::new(100.0, 100.0), -100.0);
    assert_eq!(outcome, FlingOutcome::Ignored);
}

#[test]
fn highlight_reset_is_delivered_on_the_next_tick() {
    let fixture = Fixture::new();
    fixture
        .dispatcher
        .on_fling(Point::new(300.0, 100.0), Point::new(170.0, 110.0), -200.0);
    assert!(fixture.cancels.borrow().is_empty());

    fixture.runtime.tick(16);
    let cancels = fixture.cancels.borrow();
    assert_eq!(cancels.len(), 1);
    assert_eq!(cancels[0].phase, MotionPhase::Cancel);
}

#[test]
fn detaching_drops_the_pending_highlight_reset() {
    let fixture = Fixture::new();
    fixture
        .dispatcher
        .on_fling(Point::new(300.0, 100.0), Point::new(170.0, 110.0), -200.0);
    fixture.dispatcher.on_detached();
    fixture.runtime.tick(16);

    assert!(fixture.cancels.borrow().is_empty());
    assert_eq!(
        fixture
            .dispatcher
            .on_fling(Point::new(300.0, 100.0), Point::new(170.0, 110.0), -200.0),
        FlingOutcome::Ignored
    );
}

#[test]
fn raw_samples_resolve_through_the_classifier() {
    let fixture = Fixture::new();
    let samples = [
        MotionSample::down(400.0, 200.0, 0),
        MotionSample::move_to(340.0, 201.0, 10),
        MotionSample::move_to(280.0, 202.0, 20),
        MotionSample::move_to(220.0, 203.0, 30),
    ];
    for sample in &samples {
        assert!(!fixture.dispatcher.on_touch_event(sample));
    }
    assert!(fixture
        .dispatcher
        .on_touch_event(&MotionSample::up(160.0, 204.0, 40)));
    assert_eq!(fixture.toggles.calls.borrow().as_slice(), &[("read", 102)]);
}

#[test]
fn short_raw_fling_over_a_row_still_clears_the_highlight() {
    let fixture = Fixture::new();
    let samples = [
        MotionSample::down(300.0, 200.0, 0),
        MotionSample::move_to(280.0, 201.0, 10),
        MotionSample::move_to(260.0, 202.0, 20),
        MotionSample::move_to(240.0, 203.0, 30),
    ];
    for sample in &samples {
        fixture.dispatcher.on_touch_event(sample);
    }
    assert!(fixture
        .dispatcher
        .on_touch_event(&MotionSample::up(220.0, 204.0, 40)));
    assert!(fixture.toggles.calls.borrow().is_empty());
    assert!(fixture.dispatcher.is_highlight_reset_pending());

    fixture.runtime.tick(16);
    assert_eq!(fixture.cancels.borrow().len(), 1);
}
