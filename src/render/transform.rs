use crate::{
    foundation::{
        core::{Affine, Rect, ScreenRect, Size, Vec2, Viewport},
        math::clamp_low_wins,
    },
    gesture::state::{AnchorMode, TransformState, clamp_scale},
    render::target::SpriteTarget,
};

/// Height of the screen band at the top reserved for the speech bubble.
pub const TOP_BAND_PX: f64 = 150.0;
/// Horizontal margin kept between the sprite and the viewport edge.
pub const SIDE_MARGIN_PX: f64 = 100.0;

/// Offset clamp rectangle for one anchor mode.
///
/// The two modes use different formulas that are kept exactly as the live layout expects them;
/// corner mode in particular allows offsets that overshoot the viewport on the right and bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl OffsetBounds {
    pub fn for_mode(mode: AnchorMode, vp: Viewport) -> Self {
        let min_y = -vp.height / 2.0 + TOP_BAND_PX;
        match mode {
            AnchorMode::Centered => {
                let max_x = vp.width / 2.0 - SIDE_MARGIN_PX;
                Self {
                    min_x: -max_x,
                    max_x,
                    min_y,
                    max_y: vp.height / 2.0 - TOP_BAND_PX,
                }
            }
            AnchorMode::Corner => Self {
                min_x: -vp.width / 2.0 + SIDE_MARGIN_PX,
                max_x: vp.width - 2.0 * SIDE_MARGIN_PX,
                min_y,
                max_y: vp.height - 2.0 * TOP_BAND_PX,
            },
        }
    }

    /// Clamp each axis; when a small viewport makes the bounds cross, the minimum wins so the
    /// top band is never entered.
    pub fn clamp(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            clamp_low_wins(v.x, self.min_x, self.max_x),
            clamp_low_wins(v.y, self.min_y, self.max_y),
        )
    }
}

/// Where an element's layout position is pinned inside its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAnchor {
    /// `top: 50%; left: 50%`.
    Center,
    /// `top: 0; left: 0`.
    TopLeft,
}

impl LayoutAnchor {
    /// CSS value written to both `top` and `left`.
    pub fn css_position(self) -> &'static str {
        match self {
            Self::Center => "50%",
            Self::TopLeft => "0",
        }
    }
}

/// The visual transform written to the sprite element.
///
/// For [`LayoutAnchor::Center`] the translation is added to a `-50%` self-offset; for
/// [`LayoutAnchor::TopLeft`] it is an absolute position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SpriteTransform {
    pub anchor: LayoutAnchor,
    pub translate: Vec2,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation_deg: f64,
}

impl SpriteTransform {
    /// The CSS `transform` value a DOM host writes for this placement.
    pub fn to_css(&self) -> String {
        let (x, y) = (css_num(self.translate.x), css_num(self.translate.y));
        let (sx, sy, r) = (
            css_num(self.scale_x),
            css_num(self.scale_y),
            css_num(self.rotation_deg),
        );
        match self.anchor {
            LayoutAnchor::Center => format!(
                "translate3d(calc(-50% + {x}px),calc(-50% + {y}px),0) scale({sx},{sy}) rotate({r}deg)"
            ),
            LayoutAnchor::TopLeft => {
                format!("translate3d({x}px,{y}px,0) scale({sx},{sy}) rotate({r}deg)")
            }
        }
    }

    /// Element-local to viewport mapping for a box of `box_size` laid out in a container the size
    /// of `viewport`, with the transform origin at the box center.
    pub fn screen_affine(&self, box_size: Size, viewport: Viewport) -> Affine {
        let (layout_origin, self_offset) = match self.anchor {
            LayoutAnchor::Center => (
                viewport.center().to_vec2(),
                Vec2::new(-box_size.width / 2.0, -box_size.height / 2.0),
            ),
            LayoutAnchor::TopLeft => (Vec2::ZERO, Vec2::ZERO),
        };
        let origin = Vec2::new(box_size.width / 2.0, box_size.height / 2.0);
        Affine::translate(layout_origin + origin + self_offset + self.translate)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::translate(-origin)
    }

    /// Axis-aligned bounds of the transformed box in viewport pixels.
    pub fn screen_bounds(&self, box_size: Size, viewport: Viewport) -> ScreenRect {
        let local = Rect::from_origin_size((0.0, 0.0), box_size);
        ScreenRect::from_rect(
            self.screen_affine(box_size, viewport)
                .transform_rect_bbox(local),
        )
    }
}

fn css_num(v: f64) -> f64 {
    // Avoid printing "-0".
    if v == 0.0 { 0.0 } else { v }
}

/// Result of mapping a [`TransformState`] to a [`SpriteTransform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub transform: SpriteTransform,
    /// Set when corner-mode placement pushed the sprite out of the top band; the owner of the state
    /// should store this as the new `offset.y`.
    pub corrected_offset_y: Option<f64>,
}

/// Which properties an [`TransformRenderer::apply`] call actually wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderWrites {
    pub anchor: bool,
    pub transform: bool,
    pub visibility: bool,
    pub corrected_offset_y: Option<f64>,
}

impl RenderWrites {
    pub fn any(&self) -> bool {
        self.anchor || self.transform || self.visibility
    }
}

/// Maps transform state onto the sprite's render target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformRenderer;

impl TransformRenderer {
    /// Corner-mode sprites sit at this position before the offset is added.
    pub fn corner_base(vp: Viewport) -> Vec2 {
        Vec2::new(
            vp.width / 2.0 - SIDE_MARGIN_PX,
            vp.height * 0.6 - TOP_BAND_PX,
        )
    }

    pub fn placement(state: &TransformState, vp: Viewport) -> Placement {
        let scale = clamp_scale(state.scale);
        let scale_x = scale * state.flip.sign();
        match state.anchor_mode {
            AnchorMode::Centered => Placement {
                transform: SpriteTransform {
                    anchor: LayoutAnchor::Center,
                    translate: state.offset,
                    scale_x,
                    scale_y: scale,
                    rotation_deg: state.rotation_deg,
                },
                corrected_offset_y: None,
            },
            AnchorMode::Corner => {
                let base = Self::corner_base(vp);
                let min_y = -vp.height / 2.0 + TOP_BAND_PX;
                let mut fin = base + state.offset;
                let mut corrected_offset_y = None;
                if fin.y < base.y + min_y {
                    fin.y = base.y + min_y;
                    corrected_offset_y = Some(min_y);
                }
                Placement {
                    transform: SpriteTransform {
                        anchor: LayoutAnchor::TopLeft,
                        translate: fin,
                        scale_x,
                        scale_y: scale,
                        rotation_deg: state.rotation_deg,
                    },
                    corrected_offset_y,
                }
            }
        }
    }

    /// Write the placement for `state` into `target`, skipping properties that already hold the
    /// new value, and make sure the sprite is visible.
    pub fn apply<T: SpriteTarget + ?Sized>(
        state: &TransformState,
        vp: Viewport,
        target: &mut T,
    ) -> RenderWrites {
        let placement = Self::placement(state, vp);
        let mut writes = RenderWrites {
            corrected_offset_y: placement.corrected_offset_y,
            ..RenderWrites::default()
        };

        if target.anchor() != Some(placement.transform.anchor) {
            target.set_anchor(placement.transform.anchor);
            writes.anchor = true;
        }
        if target.transform() != Some(placement.transform) {
            target.set_transform(placement.transform);
            writes.transform = true;
        }
        if !target.is_visible() {
            target.set_visible(true);
            writes.visibility = true;
        }
        writes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/transform.rs"]
mod tests;
