use crate::foundation::{
    core::{Canvas, Rect, ScreenRect, Size},
    error::{ArsnapError, ArsnapResult},
};

/// Output resolution policy for captures.
///
/// The scale factor is `max(device_pixel_ratio * dpr_multiplier, min_width / video.width,
/// min_height / video.height)`, applied uniformly to the displayed video rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CapturePolicy {
    pub device_pixel_ratio: f64,
    pub dpr_multiplier: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            dpr_multiplier: 2.0,
            min_width: 1920.0,
            min_height: 1080.0,
        }
    }
}

/// Resolved output size for one capture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureFrame {
    /// Viewport px to raster px.
    pub scale: f64,
    pub canvas: Canvas,
}

impl CapturePolicy {
    pub fn validate(&self) -> ArsnapResult<()> {
        for (name, v) in [
            ("device_pixel_ratio", self.device_pixel_ratio),
            ("dpr_multiplier", self.dpr_multiplier),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ArsnapError::validation(format!(
                    "capture policy {name} must be finite and >= 0"
                )));
            }
        }
        if self.device_pixel_ratio * self.dpr_multiplier <= 0.0
            && self.min_width <= 0.0
            && self.min_height <= 0.0
        {
            return Err(ArsnapError::validation(
                "capture policy yields a zero scale factor",
            ));
        }
        Ok(())
    }

    pub fn scale_factor(&self, video: ScreenRect) -> ArsnapResult<f64> {
        if video.is_empty() {
            return Err(ArsnapError::validation(format!(
                "video display rect must be non-empty, got {}x{}",
                video.width, video.height
            )));
        }
        Ok((self.device_pixel_ratio * self.dpr_multiplier)
            .max(self.min_width / video.width)
            .max(self.min_height / video.height))
    }

    pub fn frame_for(&self, video: ScreenRect) -> ArsnapResult<CaptureFrame> {
        let scale = self.scale_factor(video)?;
        let width = (video.width * scale).round();
        let height = (video.height * scale).round();
        if !(width >= 1.0 && height >= 1.0 && width <= f64::from(u32::MAX) && height <= f64::from(u32::MAX))
        {
            return Err(ArsnapError::validation(format!(
                "capture resolves to an unusable {width}x{height} raster"
            )));
        }
        Ok(CaptureFrame {
            scale,
            canvas: Canvas {
                width: width as u32,
                height: height as u32,
            },
        })
    }
}

/// Source region of a video frame, in native pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceCrop {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
}

impl SourceCrop {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.sx, self.sy, self.sx + self.sw, self.sy + self.sh)
    }
}

/// Crop of a `native`-sized frame that fills a `display`-sized box without distortion, centered
/// on the cropped axis. Offsets and extents are rounded to whole pixels.
pub fn cover_crop(native: Size, display: Size) -> SourceCrop {
    let (vw, vh) = (native.width, native.height);
    let mut crop = SourceCrop {
        sx: 0.0,
        sy: 0.0,
        sw: vw,
        sh: vh,
    };
    if vw <= 0.0 || vh <= 0.0 || display.width <= 0.0 || display.height <= 0.0 {
        return crop;
    }
    let video_ar = vw / vh;
    let view_ar = display.width / display.height;
    if video_ar > view_ar {
        crop.sw = (vh * view_ar).round();
        crop.sx = ((vw - crop.sw) / 2.0).round();
    } else if video_ar < view_ar {
        crop.sh = (vw / view_ar).round();
        crop.sy = ((vh - crop.sh) / 2.0).round();
    }
    crop
}

/// Largest rectangle with `natural`'s aspect ratio that fits inside `container`, centered.
pub fn contain_fit(natural: Size, container: ScreenRect) -> ScreenRect {
    if natural.width <= 0.0 || natural.height <= 0.0 || container.is_empty() {
        return container;
    }
    let s = (container.width / natural.width).min(container.height / natural.height);
    let (w, h) = (natural.width * s, natural.height * s);
    ScreenRect::new(
        container.left + (container.width - w) / 2.0,
        container.top + (container.height - h) / 2.0,
        w,
        h,
    )
}

/// Live screen rectangles of every layer, read in one go at capture time.
///
/// A `None` layer is hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenGeometry {
    pub video: ScreenRect,
    #[serde(default)]
    pub beam: Option<ScreenRect>,
    #[serde(default)]
    pub ground: Option<ScreenRect>,
    /// Sprite container element.
    #[serde(default)]
    pub sprite_element: Option<ScreenRect>,
    /// Rendered image inside the sprite container; derived by contain-fit when absent.
    #[serde(default)]
    pub sprite_image: Option<ScreenRect>,
    #[serde(default)]
    pub bubble: Option<ScreenRect>,
}

impl ScreenGeometry {
    /// Map a viewport rectangle into raster space for a capture at `scale`.
    pub fn to_raster(&self, rect: ScreenRect, scale: f64) -> Rect {
        let x0 = (rect.left - self.video.left) * scale;
        let y0 = (rect.top - self.video.top) * scale;
        Rect::new(x0, y0, x0 + rect.width * scale, y0 + rect.height * scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/geometry.rs"]
mod tests;
