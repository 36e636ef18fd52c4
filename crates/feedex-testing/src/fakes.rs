//! In-memory hosts for the gesture surfaces.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use feedex_ui::{ContentElement, RowId, RowLayout, ToggleHandler};
use feedex_ui_graphics::{Point, Rect};

/// Scrollable content whose scroll position the test controls.
#[derive(Debug, Default)]
pub struct FakeContent {
    pub top: f32,
    pub scrolls_up: bool,
    pub measured: Option<(f32, f32)>,
    pub bounds: Option<Rect>,
}

impl FakeContent {
    pub fn shared() -> Rc<RefCell<FakeContent>> {
        Rc::new(RefCell::new(FakeContent::default()))
    }
}

impl ContentElement for FakeContent {
    fn can_scroll_up(&self) -> bool {
        self.scrolls_up
    }

    fn top(&self) -> f32 {
        self.top
    }

    fn offset_top_and_bottom(&mut self, dy: f32) {
        self.top += dy;
        if let Some(bounds) = self.bounds.as_mut() {
            bounds.y += dy;
        }
    }

    fn measure(&mut self, width: f32, height: f32) {
        self.measured = Some((width, height));
    }

    fn layout(&mut self, bounds: Rect) {
        self.top = bounds.y;
        self.bounds = Some(bounds);
    }
}

/// Rows stacked vertically from the top of the list.
#[derive(Debug, Clone)]
pub struct FakeRowList {
    rows: Vec<(RowId, Rect)>,
}

impl FakeRowList {
    pub fn new(rows: Vec<(RowId, Rect)>) -> Self {
        Self { rows }
    }

    /// `count` rows of equal height with ids starting at `first_id`.
    pub fn uniform(count: usize, row_height: f32, width: f32, first_id: RowId) -> Self {
        let rows = (0..count)
            .map(|index| {
                (
                    first_id + index as RowId,
                    Rect::new(0.0, index as f32 * row_height, width, row_height),
                )
            })
            .collect();
        Self { rows }
    }
}

impl RowLayout for FakeRowList {
    fn row_at(&self, point: Point) -> Option<RowId> {
        self.rows
            .iter()
            .find(|(_, bounds)| bounds.contains(point.x, point.y))
            .map(|(id, _)| *id)
    }

    fn row_bounds(&self, row: RowId) -> Option<Rect> {
        self.rows
            .iter()
            .find(|(id, _)| *id == row)
            .map(|(_, bounds)| *bounds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleCall {
    Read(RowId),
    Favorite(RowId),
}

/// Records every toggle request in order.
#[derive(Debug, Default)]
pub struct RecordingToggles {
    calls: RefCell<Vec<ToggleCall>>,
}

impl RecordingToggles {
    pub fn shared() -> Rc<RecordingToggles> {
        Rc::new(RecordingToggles::default())
    }

    pub fn calls(&self) -> Vec<ToggleCall> {
        self.calls.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }
}

impl ToggleHandler for RecordingToggles {
    fn toggle_read(&self, row: RowId) {
        self.calls.borrow_mut().push(ToggleCall::Read(row));
    }

    fn toggle_favorite(&self, row: RowId) {
        self.calls.borrow_mut().push(ToggleCall::Favorite(row));
    }
}

/// Counts refresh callbacks.
#[derive(Debug, Default, Clone)]
pub struct RefreshCounter {
    count: Rc<Cell<u32>>,
}

impl RefreshCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that bumps this counter.
    pub fn listener(&self) -> impl Fn() + 'static {
        let count = Rc::clone(&self.count);
        move || count.set(count.get() + 1)
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }
}
