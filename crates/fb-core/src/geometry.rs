//! Rectangle helpers used to rank and compare drag neighbours.
//!
//! Rectangles are client-space `kurbo::Rect`s: `x0` is the left edge and
//! `y0` the top edge, matching what the host measures on screen.

use kurbo::Rect;

/// Euclidean distance between the top-left origins of two rectangles.
///
/// Only meaningful for ranking; sizes are ignored.
pub fn distance(a: &Rect, b: &Rect) -> f64 {
    a.origin().distance(b.origin())
}

/// Midpoint along the horizontal axis.
pub fn horizontal_center(rect: &Rect) -> f64 {
    rect.x0 + rect.width() / 2.0
}

/// Midpoint along the vertical axis.
pub fn vertical_center(rect: &Rect) -> f64 {
    rect.y0 + rect.height() / 2.0
}
