//! Capabilities a host provides to the gesture surfaces.

use std::cell::RefCell;
use std::rc::Rc;

use feedex_ui_graphics::{Point, Rect};

pub type RowId = i64;

/// The single scrollable child managed by a pull-to-refresh surface.
pub trait ContentElement {
    /// Whether the content can still scroll towards its top.
    fn can_scroll_up(&self) -> bool;

    /// Current top edge in the parent's coordinates.
    fn top(&self) -> f32;

    /// Moves the element vertically by `dy` without relayout.
    fn offset_top_and_bottom(&mut self, dy: f32);

    fn measure(&mut self, width: f32, height: f32);

    fn layout(&mut self, bounds: Rect);
}

pub type SharedContent = Rc<RefCell<dyn ContentElement>>;

/// Hit-testing over the currently laid-out rows.
pub trait RowLayout {
    fn row_at(&self, point: Point) -> Option<RowId>;

    fn row_bounds(&self, row: RowId) -> Option<Rect>;
}

/// Receives the toggle requests of completed row flings.
///
/// Implementations may start asynchronous persistence; they must return
/// without waiting for it.
pub trait ToggleHandler {
    fn toggle_read(&self, row: RowId);

    fn toggle_favorite(&self, row: RowId);
}
