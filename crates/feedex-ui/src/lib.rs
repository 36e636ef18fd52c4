//! Gesture-driven surfaces: pull-to-refresh and row fling toggles.

mod error;
mod host;
mod progress_indicator;
pub mod refresh;
pub mod toggle;

pub use error::LayoutError;
pub use host::{ContentElement, RowId, RowLayout, SharedContent, ToggleHandler};
pub use progress_indicator::{ColorScheme, IndicatorFrame, ProgressIndicator, SweepBand};
pub use refresh::{PullRefreshConfig, PullRefreshController, PullState};
pub use toggle::{FlingOutcome, ItemToggleConfig, ItemToggleDispatcher, ToggleTarget};

pub use feedex_foundation::{FlingDirection, FlingThresholds, MotionPhase, MotionSample};
pub use feedex_ui_graphics::{Color, Density, EdgeInsets, Point, Rect, Size};

pub mod prelude {
    pub use crate::host::{ContentElement, RowId, RowLayout, ToggleHandler};
    pub use crate::progress_indicator::IndicatorFrame;
    pub use crate::refresh::{PullRefreshConfig, PullRefreshController, PullState};
    pub use crate::toggle::{ItemToggleConfig, ItemToggleDispatcher};
    pub use feedex_foundation::prelude::*;
}
