//! Normalized pointer input, independent of any windowing or DOM layer.

use crate::foundation::core::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// One active contact in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerPoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl PointerPoint {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A pointer event as the host reports it.
///
/// For touch input `points` lists every contact still on the surface after the event (so a
/// touch-end with one finger lifted carries the remaining fingers). Mouse events carry the single
/// cursor position, including on button release.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub source: PointerSource,
    #[serde(default)]
    pub points: Vec<PointerPoint>,
    /// Whether the event target was the sprite element (host hit-test).
    #[serde(default)]
    pub on_sprite: bool,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64, on_sprite: bool) -> Self {
        Self {
            source: PointerSource::Mouse,
            points: vec![PointerPoint::new(0, x, y)],
            on_sprite,
        }
    }

    pub fn touch(points: Vec<PointerPoint>, on_sprite: bool) -> Self {
        Self {
            source: PointerSource::Touch,
            points,
            on_sprite,
        }
    }

    pub fn primary(&self) -> Option<&PointerPoint> {
        self.points.first()
    }

    pub(crate) fn positions(&self) -> Vec<Point> {
        self.points.iter().map(PointerPoint::position).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WheelEvent {
    pub delta_y: f64,
    #[serde(default)]
    pub on_sprite: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/input.rs"]
mod tests;
