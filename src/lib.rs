//! arsnap places a draggable, pinch-zoomable sprite over a live camera feed and turns what the
//! user sees into a still photo.
//!
//! # Pipeline overview
//!
//! 1. **Gesture**: pointer/touch/wheel events -> [`GestureController`] -> [`TransformState`]
//! 2. **Render**: [`TransformRenderer`] maps the state onto a [`SpriteTarget`], once per display
//!    frame while a gesture runs and synchronously when it ends
//! 3. **Capture**: a [`ScreenGeometry`] snapshot plus decoded layers -> [`CompositeCapture`] ->
//!    base [`CaptureResult`]
//! 4. **Compose**: base + caption bubble -> [`BubbleCompositor`] -> final [`CaptureResult`]
//!
//! [`PhotoSession`] ties the stages together for a host.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Gestures never fail**: bad input is ignored and out-of-range values are clamped.
//! - **Deterministic capture**: identical inputs produce identical pixels.
//! - **Premultiplied RGBA8** end-to-end; PNG export converts to straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod capture;
mod config;
mod foundation;
mod gesture;
mod render;
mod scene;
mod session;

pub use assets::decode::{PreparedImage, decode_image, load_image};
pub use assets::slot::ImageSlot;
pub use assets::text::{PreparedText, TextLayoutEngine};
pub use capture::bubble::BubbleCompositor;
pub use capture::composite::{CaptureSources, CompositeCapture};
pub use capture::geometry::{
    CaptureFrame, CapturePolicy, ScreenGeometry, SourceCrop, contain_fit, cover_crop,
};
pub use capture::label::{Label, LabelStyle};
pub use config::{LabelConfig, SessionConfig};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgba8, ScreenRect, Size, Vec2, Viewport};
pub use foundation::error::{ArsnapError, ArsnapResult};
pub use foundation::geometry::{
    distance, expand_rect, expanded_rect_contains, midpoint, rect_contains, touches_near_rect,
};
pub use gesture::controller::GestureController;
pub use gesture::input::{PointerEvent, PointerPoint, PointerSource, WheelEvent};
pub use gesture::scheduler::RenderScheduler;
pub use gesture::state::{
    AnchorMode, FlipX, GesturePhase, MAX_SCALE, MIN_PINCH_DISTANCE, MIN_SCALE, TransformState,
    clamp_scale,
};
pub use render::cpu::RasterCanvas;
pub use render::raster::{CaptureKind, CaptureResult, Raster};
pub use render::target::{MemoryTarget, SpriteTarget, WriteCounts};
pub use render::transform::{
    LayoutAnchor, OffsetBounds, Placement, RenderWrites, SpriteTransform, TransformRenderer,
};
pub use scene::{ImageSourceDef, ReplayScript, SceneDef, SceneImages, SceneTransform, ScriptEvent};
pub use session::{FinalComposeRequest, LayerImages, PhotoSession};
