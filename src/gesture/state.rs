use crate::foundation::core::{Point, Vec2};

/// Smallest sprite scale gestures may produce.
pub const MIN_SCALE: f64 = 0.5;
/// Largest sprite scale gestures may produce.
pub const MAX_SCALE: f64 = 2.0;
/// Minimum finger separation (viewport px) for a pinch to anchor.
pub const MIN_PINCH_DISTANCE: f64 = 10.0;
/// Multiplicative step for a wheel notch that zooms out.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Multiplicative step for a wheel notch that zooms in.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Which point of the container an offset is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// Offset measured from the container center.
    Centered,
    /// Offset added to a fixed base position measured from the container's top-left corner.
    Corner,
}

/// Horizontal mirror flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipX {
    #[default]
    Normal,
    Mirrored,
}

impl FlipX {
    /// `+1.0` or `-1.0`, the factor applied to the horizontal scale.
    pub fn sign(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Mirrored => -1.0,
        }
    }

    /// The opposite orientation.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Mirrored,
            Self::Mirrored => Self::Normal,
        }
    }
}

/// Transient gesture bookkeeping. Dragging and pinching exclude each other by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging {
        point_id: u32,
        anchor: Point,
        origin_offset: Vec2,
    },
    Pinching {
        anchor_distance: f64,
        anchor_scale: f64,
    },
}

/// The sprite's placement plus in-flight gesture bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransformState {
    pub offset: Vec2,
    pub scale: f64,
    pub flip: FlipX,
    /// Degrees. Carried through rendering and capture; gestures never change it.
    pub rotation_deg: f64,
    pub phase: GesturePhase,
    pub anchor_mode: AnchorMode,
}

impl Default for TransformState {
    /// State at sprite appearance: the entry animation runs in corner mode.
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            flip: FlipX::Normal,
            rotation_deg: 0.0,
            phase: GesturePhase::Idle,
            anchor_mode: AnchorMode::Corner,
        }
    }
}

impl TransformState {
    /// State after a retake: centered, identity placement, no gesture in flight.
    pub fn reset(&mut self) {
        *self = Self {
            anchor_mode: AnchorMode::Centered,
            ..Self::default()
        };
    }

    /// Switch to centered mode once the entry animation finishes. Irreversible.
    ///
    /// Returns `false` when already centered.
    pub fn complete_entry(&mut self) -> bool {
        if self.anchor_mode == AnchorMode::Centered {
            return false;
        }
        self.anchor_mode = AnchorMode::Centered;
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
        self.rotation_deg = 0.0;
        true
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.phase, GesturePhase::Pinching { .. })
    }

    /// Horizontal scale factor including the mirror sign.
    pub fn scale_x(&self) -> f64 {
        self.scale * self.flip.sign()
    }
}

/// Clamp a scale into `[MIN_SCALE, MAX_SCALE]`; non-finite input maps to the nearest valid value.
pub fn clamp_scale(s: f64) -> f64 {
    if s.is_nan() {
        return 1.0;
    }
    s.clamp(MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/state.rs"]
mod tests;
