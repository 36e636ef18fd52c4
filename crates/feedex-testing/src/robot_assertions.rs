//! Assertion helpers for gesture tests.

use feedex_ui_graphics::Rect;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{msg}: expected {expected} (±{tolerance}), got {actual} (diff: {diff})"
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{msg} - x"));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{msg} - y"));
    assert_approx_eq(actual.width, expected.width, tolerance, &format!("{msg} - width"));
    assert_approx_eq(actual.height, expected.height, tolerance, &format!("{msg} - height"));
}

/// Assert that every value is strictly greater than the one before it.
pub fn assert_strictly_increasing(values: &[f32], msg: &str) {
    for (index, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] > pair[0],
            "{msg}: value {} at {} does not exceed {} at {}",
            pair[1],
            index + 1,
            pair[0],
            index
        );
    }
}

/// Assert that every value lies in the closed range `[low, high]`.
pub fn assert_all_within(values: &[f32], low: f32, high: f32, msg: &str) {
    for (index, value) in values.iter().enumerate() {
        assert!(
            (low..=high).contains(value),
            "{msg}: value {value} at {index} outside [{low}, {high}]"
        );
    }
}
