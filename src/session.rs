use std::{
    sync::Arc,
    task::Poll,
    time::{Duration, Instant},
};

use crate::{
    assets::{decode::PreparedImage, slot::ImageSlot},
    capture::{
        bubble::BubbleCompositor,
        composite::{CaptureSources, CompositeCapture},
        geometry::ScreenGeometry,
        label::Label,
    },
    config::SessionConfig,
    foundation::{
        core::{ScreenRect, Viewport},
        error::{ArsnapError, ArsnapResult},
    },
    gesture::{
        controller::GestureController,
        input::{PointerEvent, WheelEvent},
        state::{FlipX, TransformState},
    },
    render::{raster::CaptureResult, target::SpriteTarget, transform::RenderWrites},
};

/// Decoded layer images available at capture time. `None` means not loaded yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerImages<'a> {
    pub video_frame: Option<&'a PreparedImage>,
    pub beam: Option<&'a PreparedImage>,
    pub ground: Option<&'a PreparedImage>,
    pub sprite: Option<&'a PreparedImage>,
}

#[derive(Clone, Debug)]
struct BaseCapture {
    result: CaptureResult,
    /// Video rectangle at capture time; the bubble pass maps against it.
    video_rect: ScreenRect,
}

/// One camera session: live sprite manipulation, photo capture, and final compose.
pub struct PhotoSession<T: SpriteTarget> {
    config: SessionConfig,
    gestures: GestureController<T>,
    capture: CompositeCapture,
    label: Label,
    base: Option<BaseCapture>,
}

impl<T: SpriteTarget> PhotoSession<T> {
    /// Start a session. A label font that cannot be read is logged and the caption falls back to
    /// the box alone.
    pub fn new(config: SessionConfig, viewport: Viewport, target: T) -> ArsnapResult<Self> {
        config.validate()?;
        let font = config
            .label
            .font_path
            .as_ref()
            .and_then(|path| match std::fs::read(path) {
                Ok(bytes) => Some(Arc::new(bytes)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "label font unreadable");
                    None
                }
            });
        let label = Label {
            text: config.label.text.clone(),
            font,
            style: config.label.style,
        };
        Ok(Self {
            capture: CompositeCapture::new(config.capture),
            gestures: GestureController::new(viewport, target),
            label,
            base: None,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn gestures(&self) -> &GestureController<T> {
        &self.gestures
    }

    pub fn gestures_mut(&mut self) -> &mut GestureController<T> {
        &mut self.gestures
    }

    pub fn transform(&self) -> &TransformState {
        self.gestures.state()
    }

    pub fn on_pointer_down(&mut self, ev: &PointerEvent) -> bool {
        self.gestures.on_pointer_down(ev)
    }

    pub fn on_pointer_move(&mut self, ev: &PointerEvent) -> bool {
        self.gestures.on_pointer_move(ev)
    }

    pub fn on_pointer_up(&mut self, ev: &PointerEvent) -> bool {
        self.gestures.on_pointer_up(ev)
    }

    pub fn on_pointer_cancel(&mut self) {
        self.gestures.on_pointer_cancel();
    }

    pub fn on_wheel(&mut self, ev: &WheelEvent) -> bool {
        self.gestures.on_wheel(ev)
    }

    pub fn on_animation_frame(&mut self) -> Option<RenderWrites> {
        self.gestures.on_animation_frame()
    }

    pub fn complete_entry(&mut self) {
        self.gestures.complete_entry();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.gestures.set_viewport(viewport);
    }

    pub fn set_flip(&mut self, flip: FlipX) {
        self.gestures.set_flip(flip);
    }

    pub fn set_rotation(&mut self, deg: f64) {
        self.gestures.set_rotation(deg);
    }

    pub fn reset_transform(&mut self) {
        self.gestures.reset_transform();
    }

    /// Entry animation started: place the sprite at its corner position and show it.
    pub fn show_sprite(&mut self) {
        self.gestures.render_now();
    }

    /// Capture the base photo from a geometry snapshot taken by the caller right now.
    ///
    /// Refused until the sprite is on screen, in either anchor mode.
    pub fn capture_photo(
        &mut self,
        geometry: ScreenGeometry,
        images: LayerImages<'_>,
    ) -> ArsnapResult<&CaptureResult> {
        if !self.gestures.target().is_visible() {
            return Err(ArsnapError::validation(
                "sprite is not shown yet; capture after its entry starts",
            ));
        }
        let mut sources = CaptureSources::new(geometry, images.video_frame)
            .with_transform(self.gestures.state());
        sources.beam = images.beam;
        sources.ground = images.ground;
        sources.sprite = images.sprite;
        sources.label = (!self.label.text.is_empty()).then_some(&self.label);

        let result = self.capture.capture(&sources)?;
        let base = self.base.insert(BaseCapture {
            result,
            video_rect: geometry.video,
        });
        Ok(&base.result)
    }

    pub fn base(&self) -> Option<&CaptureResult> {
        self.base.as_ref().map(|b| &b.result)
    }

    /// Final photo with the bubble at `bubble_rect`. Falls back to the base capture when the
    /// bubble is unavailable or compositing fails; errors only when no photo was taken.
    pub fn compose_final(
        &self,
        bubble: Option<&PreparedImage>,
        bubble_rect: ScreenRect,
    ) -> ArsnapResult<CaptureResult> {
        let base = self.require_base()?;
        Ok(compose_or_base(
            &base.result,
            bubble,
            bubble_rect,
            base.video_rect,
        ))
    }

    /// Snapshot the bubble geometry now and resolve the final photo once the bubble image settles
    /// or the configured fallback elapses.
    pub fn request_final(
        &self,
        bubble_rect: ScreenRect,
        now: Instant,
    ) -> ArsnapResult<FinalComposeRequest> {
        let base = self.require_base()?;
        Ok(FinalComposeRequest {
            base: base.result.clone(),
            bubble_rect,
            video_rect: base.video_rect,
            deadline: now + self.config.bubble_decode_fallback(),
        })
    }

    /// Discard the photo and put the sprite back at its default placement.
    pub fn retake(&mut self) {
        self.base = None;
        self.gestures.reset_transform();
    }

    fn require_base(&self) -> ArsnapResult<&BaseCapture> {
        self.base
            .as_ref()
            .ok_or_else(|| ArsnapError::validation("no base capture; take a photo first"))
    }
}

/// A final compose waiting on the bubble image decode.
#[derive(Clone, Debug)]
pub struct FinalComposeRequest {
    base: CaptureResult,
    bubble_rect: ScreenRect,
    video_rect: ScreenRect,
    deadline: Instant,
}

impl FinalComposeRequest {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Resolve against the current bubble state. Pending until the bubble decodes or fails, or
    /// until the deadline passes, after which the base capture is returned.
    pub fn poll(&self, bubble: &ImageSlot, now: Instant) -> Poll<CaptureResult> {
        match bubble {
            ImageSlot::Ready(_) => Poll::Ready(compose_or_base(
                &self.base,
                bubble.ready(),
                self.bubble_rect,
                self.video_rect,
            )),
            ImageSlot::Failed(reason) => {
                tracing::warn!(%reason, "bubble image failed to decode, keeping base capture");
                Poll::Ready(self.base.clone())
            }
            ImageSlot::Pending if now >= self.deadline => {
                tracing::warn!("bubble decode timed out, keeping base capture");
                Poll::Ready(self.base.clone())
            }
            ImageSlot::Pending => Poll::Pending,
        }
    }
}

fn compose_or_base(
    base: &CaptureResult,
    bubble: Option<&PreparedImage>,
    bubble_rect: ScreenRect,
    video_rect: ScreenRect,
) -> CaptureResult {
    match BubbleCompositor::compose(base, bubble, bubble_rect, video_rect) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(error = %err, "final compose failed, keeping base capture");
            base.clone()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
