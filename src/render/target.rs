use crate::{
    foundation::core::{ScreenRect, Size, Viewport},
    render::transform::{LayoutAnchor, SpriteTransform},
};

/// The element a [`crate::render::transform::TransformRenderer`] writes into.
///
/// Getters report the values currently applied so the renderer can skip redundant writes. The
/// frame hooks let a host wire the pending-render scheduler to its display-refresh callback.
pub trait SpriteTarget {
    fn anchor(&self) -> Option<LayoutAnchor>;
    fn set_anchor(&mut self, anchor: LayoutAnchor);

    fn transform(&self) -> Option<SpriteTransform>;
    fn set_transform(&mut self, transform: SpriteTransform);

    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    /// Live on-screen bounds of the sprite element.
    fn bounding_rect(&self) -> ScreenRect;

    /// Drag highlight on/off.
    fn set_dragging(&mut self, _dragging: bool) {}

    /// A render became pending; the host should call back on its next display frame.
    fn request_frame(&mut self) {}

    /// The pending render was flushed synchronously; drop the frame callback.
    fn cancel_frame(&mut self) {}

    /// The layout viewport changed size.
    fn viewport_changed(&mut self, _viewport: Viewport) {}
}

/// Counters of property writes, used to observe redundant-write suppression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteCounts {
    pub anchor: u32,
    pub transform: u32,
    pub visibility: u32,
}

/// Headless [`SpriteTarget`] that lays out a fixed-size box in a viewport.
#[derive(Clone, Debug)]
pub struct MemoryTarget {
    pub box_size: Size,
    pub viewport: Viewport,
    anchor: Option<LayoutAnchor>,
    transform: Option<SpriteTransform>,
    visible: bool,
    dragging: bool,
    frame_requested: bool,
    writes: WriteCounts,
}

impl MemoryTarget {
    /// Sprite element size used by the live layout.
    pub const DEFAULT_BOX: Size = Size::new(200.0, 300.0);

    pub fn new(box_size: Size, viewport: Viewport) -> Self {
        Self {
            box_size,
            viewport,
            anchor: None,
            transform: None,
            visible: false,
            dragging: false,
            frame_requested: false,
            writes: WriteCounts::default(),
        }
    }

    pub fn writes(&self) -> WriteCounts {
        self.writes
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// CSS `transform` value currently applied, if any.
    pub fn css_transform(&self) -> Option<String> {
        self.transform.map(|t| t.to_css())
    }
}

impl SpriteTarget for MemoryTarget {
    fn anchor(&self) -> Option<LayoutAnchor> {
        self.anchor
    }

    fn set_anchor(&mut self, anchor: LayoutAnchor) {
        self.anchor = Some(anchor);
        self.writes.anchor += 1;
    }

    fn transform(&self) -> Option<SpriteTransform> {
        self.transform
    }

    fn set_transform(&mut self, transform: SpriteTransform) {
        self.transform = Some(transform);
        self.writes.transform += 1;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.writes.visibility += 1;
    }

    fn bounding_rect(&self) -> ScreenRect {
        match self.transform {
            Some(t) => t.screen_bounds(self.box_size, self.viewport),
            None => ScreenRect::new(0.0, 0.0, self.box_size.width, self.box_size.height),
        }
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_requested = false;
    }

    fn viewport_changed(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;
