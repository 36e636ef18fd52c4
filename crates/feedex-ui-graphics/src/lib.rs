//! Pure math/data for geometry, colors and density units in FeedEx
//!
//! This crate contains the geometry primitives, color definitions and
//! unit types shared by the gesture, animation and widget crates.

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::unit::{Density, Dp};
}
