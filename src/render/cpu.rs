use std::sync::Arc;

use crate::{
    assets::{decode::PreparedImage, text::PreparedText},
    foundation::{
        core::{Affine, Canvas, Rect, Rgba8},
        error::{ArsnapError, ArsnapResult},
    },
    render::raster::Raster,
};

/// One-shot `vello_cpu` drawing surface.
///
/// Every draw is recorded into a single render context and rasterized into a fresh pixmap by
/// [`RasterCanvas::finish`], so a canvas never reads back earlier output.
pub struct RasterCanvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl RasterCanvas {
    pub fn new(canvas: Canvas) -> ArsnapResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ArsnapError::render("raster canvas must be non-empty"));
        }
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ArsnapError::render("raster width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ArsnapError::render("raster height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Draw the `src` pixel region of `image` into `dst`, then map through `transform`.
    pub fn draw_image(
        &mut self,
        image: &PreparedImage,
        src: Rect,
        dst: Rect,
        transform: Affine,
    ) -> ArsnapResult<()> {
        let paint = image_paint(
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?,
        );
        self.draw_paint(paint, src, dst, transform);
        Ok(())
    }

    /// Draw a previously produced raster at its own size, untransformed.
    pub fn draw_raster(&mut self, raster: &Raster) -> ArsnapResult<()> {
        let paint = image_paint(image_premul_bytes_to_pixmap(
            raster.data(),
            raster.width,
            raster.height,
        )?);
        let full = Rect::new(0.0, 0.0, f64::from(raster.width), f64::from(raster.height));
        self.draw_paint(paint, full, full, Affine::IDENTITY);
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill the glyph runs of `text`, with layout coordinates mapped through `transform`.
    pub fn draw_text(&mut self, text: &PreparedText, transform: Affine) {
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(text.font_bytes.as_ref().clone()),
            0,
        );
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));

        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Layout-space positions: run offset plus advances, on the run baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> ArsnapResult<Raster> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Raster::from_premul_rgba8(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn draw_paint(&mut self, paint: vello_cpu::Image, src: Rect, dst: Rect, transform: Affine) {
        if src.width() <= 0.0 || src.height() <= 0.0 || dst.width() <= 0.0 || dst.height() <= 0.0
        {
            return;
        }
        let map = transform
            * Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
            * Affine::translate((-src.x0, -src.y0));

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(map));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&rect_to_cpu(src));
    }
}

fn image_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ArsnapResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ArsnapError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ArsnapError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ArsnapError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
