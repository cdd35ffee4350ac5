//! Pure point/rectangle helpers shared by gesture hit-testing and capture.

use crate::foundation::core::{Point, ScreenRect};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Midpoint of two points.
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Inclusive point-in-rectangle test.
pub fn rect_contains(rect: ScreenRect, p: Point) -> bool {
    p.x >= rect.left && p.x <= rect.right() && p.y >= rect.top && p.y <= rect.bottom()
}

/// Grow `rect` by `padding` on every side.
pub fn expand_rect(rect: ScreenRect, padding: f64) -> ScreenRect {
    ScreenRect::new(
        rect.left - padding,
        rect.top - padding,
        rect.width + 2.0 * padding,
        rect.height + 2.0 * padding,
    )
}

/// Inclusive containment against `rect` grown by `padding`.
pub fn expanded_rect_contains(rect: ScreenRect, padding: f64, p: Point) -> bool {
    rect_contains(expand_rect(rect, padding), p)
}

/// Whether a two-finger gesture lies close enough to `sprite` to count as a pinch on it.
///
/// The sprite rectangle is grown by half its larger dimension; either touch or their midpoint
/// inside the grown rectangle qualifies.
pub fn touches_near_rect(a: Point, b: Point, sprite: ScreenRect) -> bool {
    let padding = sprite.width.max(sprite.height) * 0.5;
    let near = expand_rect(sprite, padding);
    rect_contains(near, a) || rect_contains(near, b) || rect_contains(near, midpoint(a, b))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
