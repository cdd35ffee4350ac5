use crate::{
    assets::{decode::PreparedImage, text::TextLayoutEngine},
    capture::{
        geometry::{CaptureFrame, CapturePolicy, ScreenGeometry, contain_fit, cover_crop},
        label::{Label, draw_label},
    },
    foundation::{
        core::{Affine, Rect, Size},
        error::ArsnapResult,
    },
    gesture::state::{FlipX, TransformState},
    render::{
        cpu::RasterCanvas,
        raster::{CaptureKind, CaptureResult},
    },
};

/// Everything a base capture reads: a geometry snapshot plus the decoded layer images.
///
/// A layer image that is `None` (not loaded) or empty is skipped.
#[derive(Clone, Debug)]
pub struct CaptureSources<'a> {
    pub geometry: ScreenGeometry,
    pub video_frame: Option<&'a PreparedImage>,
    pub beam: Option<&'a PreparedImage>,
    pub ground: Option<&'a PreparedImage>,
    pub sprite: Option<&'a PreparedImage>,
    pub sprite_rotation_deg: f64,
    pub sprite_flip: FlipX,
    pub label: Option<&'a Label>,
}

impl<'a> CaptureSources<'a> {
    /// Sources with only a video layer.
    pub fn new(geometry: ScreenGeometry, video_frame: Option<&'a PreparedImage>) -> Self {
        Self {
            geometry,
            video_frame,
            beam: None,
            ground: None,
            sprite: None,
            sprite_rotation_deg: 0.0,
            sprite_flip: FlipX::Normal,
            label: None,
        }
    }

    /// Take sprite rotation and mirroring from the live transform state.
    pub fn with_transform(mut self, state: &TransformState) -> Self {
        self.sprite_rotation_deg = state.rotation_deg;
        self.sprite_flip = state.flip;
        self
    }
}

/// Rebuilds the on-screen layer stack at capture resolution.
pub struct CompositeCapture {
    policy: CapturePolicy,
    text: TextLayoutEngine,
}

impl CompositeCapture {
    pub fn new(policy: CapturePolicy) -> Self {
        Self {
            policy,
            text: TextLayoutEngine::new(),
        }
    }

    pub fn policy(&self) -> &CapturePolicy {
        &self.policy
    }

    /// Produce a base capture. Fails only on an unusable video rectangle or a raster backend
    /// error; missing layers are skipped.
    #[tracing::instrument(skip(self, sources), fields(video = ?sources.geometry.video))]
    pub fn capture(&mut self, sources: &CaptureSources<'_>) -> ArsnapResult<CaptureResult> {
        let frame = self.policy.frame_for(sources.geometry.video)?;
        let mut canvas = RasterCanvas::new(frame.canvas)?;
        let full = Rect::new(
            0.0,
            0.0,
            f64::from(frame.canvas.width),
            f64::from(frame.canvas.height),
        );

        draw_video(&mut canvas, sources, frame, full)?;
        for (name, image, rect) in [
            ("beam", sources.beam, sources.geometry.beam),
            ("ground", sources.ground, sources.geometry.ground),
        ] {
            let Some(rect) = rect else {
                continue;
            };
            match usable(image) {
                Some(img) => canvas.draw_image(
                    img,
                    full_rect(img),
                    sources.geometry.to_raster(rect, frame.scale),
                    Affine::IDENTITY,
                )?,
                None => tracing::warn!(layer = name, "overlay image not loaded, skipping"),
            }
        }
        draw_sprite(&mut canvas, sources, frame)?;
        if let Some(label) = sources.label {
            draw_label(&mut canvas, &mut self.text, label, frame.scale);
        }

        tracing::debug!(
            width = frame.canvas.width,
            height = frame.canvas.height,
            scale = frame.scale,
            "base capture rendered"
        );
        Ok(CaptureResult {
            kind: CaptureKind::Base,
            raster: canvas.finish()?,
        })
    }
}

fn usable(image: Option<&PreparedImage>) -> Option<&PreparedImage> {
    image.filter(|img| !img.is_empty())
}

fn full_rect(img: &PreparedImage) -> Rect {
    Rect::from_origin_size((0.0, 0.0), img.size())
}

fn draw_video(
    canvas: &mut RasterCanvas,
    sources: &CaptureSources<'_>,
    frame: CaptureFrame,
    full: Rect,
) -> ArsnapResult<()> {
    let native = sources
        .video_frame
        .map(PreparedImage::size)
        .filter(|s| s.width > 0.0 && s.height > 0.0)
        .unwrap_or_else(|| full.size());
    let video = sources.geometry.video;
    let crop = cover_crop(native, Size::new(video.width, video.height));
    match usable(sources.video_frame) {
        Some(img) => canvas.draw_image(img, crop.to_rect(), full, Affine::IDENTITY),
        None => {
            tracing::warn!(raster = ?frame.canvas, "video frame unavailable, capture has no background");
            Ok(())
        }
    }
}

fn draw_sprite(
    canvas: &mut RasterCanvas,
    sources: &CaptureSources<'_>,
    frame: CaptureFrame,
) -> ArsnapResult<()> {
    let Some(element) = sources.geometry.sprite_element else {
        return Ok(());
    };
    let Some(img) = usable(sources.sprite) else {
        tracing::warn!("sprite image not loaded, skipping");
        return Ok(());
    };
    if element.is_empty() {
        tracing::warn!(?element, "sprite element has zero size, skipping");
        return Ok(());
    }

    let natural = img.size();
    let image_rect = match sources.geometry.sprite_image {
        Some(r) if !r.is_empty() => r,
        _ => contain_fit(natural, element),
    };
    let natural_ar = natural.width / natural.height;
    if (natural_ar - element.aspect()).abs() > 0.01 {
        tracing::debug!(
            natural_ar,
            element_ar = element.aspect(),
            "sprite letterboxed inside its element"
        );
    }

    let center = image_rect.center();
    let video = sources.geometry.video;
    let (w, h) = (image_rect.width * frame.scale, image_rect.height * frame.scale);
    let to_raster = Affine::translate((
        (center.x - video.left) * frame.scale,
        (center.y - video.top) * frame.scale,
    )) * Affine::rotate(sources.sprite_rotation_deg.to_radians())
        * Affine::scale_non_uniform(sources.sprite_flip.sign(), 1.0);
    canvas.draw_image(
        img,
        full_rect(img),
        Rect::new(-w / 2.0, -h / 2.0, w / 2.0, h / 2.0),
        to_raster,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/capture/composite.rs"]
mod tests;
