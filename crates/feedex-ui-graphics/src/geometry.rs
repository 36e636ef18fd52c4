//! Points, sizes, rectangles and edge insets in pixels.

use std::ops::Sub;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Nearest whole-pixel point; row hit-testing works on these.
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

/// `a - b` is the `(dx, dy)` travelled from `b` to `a`.
impl Sub for Point {
    type Output = (f32, f32);

    fn sub(self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Edges are inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x..=self.right()).contains(&x) && (self.y..=self.bottom()).contains(&y)
    }
}

/// Padding on each edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub fn from_components(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(110.0, 70.0));
        assert!(!rect.contains(9.9, 30.0));
        assert!(!rect.contains(50.0, 70.1));
    }

    #[test]
    fn point_subtraction_yields_deltas() {
        let (dx, dy) = Point::new(30.0, 5.0) - Point::new(160.0, -5.0);
        assert_eq!(dx, -130.0);
        assert_eq!(dy, 10.0);
    }

    #[test]
    fn round_snaps_to_nearest_pixel() {
        assert_eq!(Point::new(10.4, 71.6).round(), Point::new(10.0, 72.0));
    }

    #[test]
    fn insets_sums() {
        let insets = EdgeInsets::from_components(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 4.0);
        assert_eq!(insets.vertical_sum(), 6.0);
    }
}
