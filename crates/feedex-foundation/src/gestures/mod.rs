pub mod classifier;
pub mod fling;
pub mod pull;

pub use classifier::{GestureClassifier, GestureSignal};
pub use fling::{classify_fling, FlingDirection, FlingThresholds};
pub use pull::classify_pull;
