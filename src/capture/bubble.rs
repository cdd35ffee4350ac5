use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::{Affine, Rect, ScreenRect},
        error::ArsnapResult,
    },
    render::{
        cpu::RasterCanvas,
        raster::{CaptureKind, CaptureResult},
    },
};

/// Second pass that puts the caption bubble on top of a base capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubbleCompositor;

impl BubbleCompositor {
    /// Compose `bubble` over `base` at the raster position of `bubble_rect`.
    ///
    /// X and Y use separate factors (`base.width / video.width`, `base.height / video.height`).
    /// When the bubble is not loaded, or either rectangle is degenerate, `base` comes back as-is.
    /// `base` itself is never modified.
    #[tracing::instrument(skip(base, bubble))]
    pub fn compose(
        base: &CaptureResult,
        bubble: Option<&PreparedImage>,
        bubble_rect: ScreenRect,
        video_rect: ScreenRect,
    ) -> ArsnapResult<CaptureResult> {
        let Some(bubble) = bubble.filter(|b| !b.is_empty()) else {
            tracing::warn!("bubble image not ready, keeping base capture");
            return Ok(base.clone());
        };
        if bubble_rect.is_empty() || video_rect.is_empty() {
            tracing::warn!("bubble or video rect has zero size, keeping base capture");
            return Ok(base.clone());
        }

        let sx = f64::from(base.width()) / video_rect.width;
        let sy = f64::from(base.height()) / video_rect.height;
        let x0 = (bubble_rect.left - video_rect.left) * sx;
        let y0 = (bubble_rect.top - video_rect.top) * sy;
        let dst = Rect::new(
            x0,
            y0,
            x0 + bubble_rect.width * sx,
            y0 + bubble_rect.height * sy,
        );

        let mut canvas = RasterCanvas::new(base.raster.canvas())?;
        canvas.draw_raster(&base.raster)?;
        canvas.draw_image(
            bubble,
            Rect::from_origin_size((0.0, 0.0), bubble.size()),
            dst,
            Affine::IDENTITY,
        )?;
        Ok(CaptureResult {
            kind: CaptureKind::Final,
            raster: canvas.finish()?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/bubble.rs"]
mod tests;
