use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{ArsnapError, ArsnapResult},
    math::unpremultiply_rgba8_in_place,
};

/// Immutable premultiplied RGBA8 pixels.
///
/// Cloning shares the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    data: Arc<Vec<u8>>,
}

impl Raster {
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> ArsnapResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(ArsnapError::render(format!(
                "raster buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .and_then(|px| <[u8; 4]>::try_from(px).ok())
    }

    /// Straight-alpha copy suitable for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    pub fn to_png_bytes(&self) -> ArsnapResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| ArsnapError::render("raster size does not match buffer"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    pub fn save_png(&self, path: &Path) -> ArsnapResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Which stage of the photo pipeline produced a [`CaptureResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureKind {
    /// Composite of video and overlays, before the caption bubble.
    Base,
    /// Base plus caption bubble.
    Final,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureResult {
    pub kind: CaptureKind,
    pub raster: Raster,
}

impl CaptureResult {
    pub fn width(&self) -> u32 {
        self.raster.width
    }

    pub fn height(&self) -> u32 {
        self.raster.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
