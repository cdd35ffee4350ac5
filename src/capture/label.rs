use std::sync::Arc;

use crate::{
    assets::text::TextLayoutEngine,
    foundation::core::{Affine, Point, Rect, Rgba8, Size},
    render::cpu::RasterCanvas,
};

/// Geometry and colors of the caption box, in viewport pixels before capture scaling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub box_origin: Point,
    pub box_size: Size,
    pub box_color: Rgba8,
    /// Top-left of the text layout; the first line's top edge sits here.
    pub text_origin: Point,
    pub font_size: f64,
    pub text_color: Rgba8,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            box_origin: Point::new(10.0, 10.0),
            box_size: Size::new(300.0, 40.0),
            box_color: Rgba8::new(0, 0, 0, 179),
            text_origin: Point::new(20.0, 35.0),
            font_size: 16.0,
            text_color: Rgba8::WHITE,
        }
    }
}

/// Text overlay drawn on every base capture.
#[derive(Clone, Debug, Default)]
pub struct Label {
    pub text: String,
    /// Font to shape with; without one only the box is drawn.
    pub font: Option<Arc<Vec<u8>>>,
    pub style: LabelStyle,
}

pub(crate) fn draw_label(
    canvas: &mut RasterCanvas,
    engine: &mut TextLayoutEngine,
    label: &Label,
    scale: f64,
) {
    let s = &label.style;
    let origin = Point::new(s.box_origin.x * scale, s.box_origin.y * scale);
    canvas.fill_rect(
        Rect::from_origin_size(origin, Size::new(s.box_size.width * scale, s.box_size.height * scale)),
        s.box_color,
    );

    if label.text.is_empty() {
        return;
    }
    let Some(font) = label.font.clone() else {
        tracing::debug!("label font missing, drawing box only");
        return;
    };
    let size_px = (s.font_size * scale) as f32;
    match engine.layout_line(&label.text, font, size_px, s.text_color) {
        Ok(text) => canvas.draw_text(
            &text,
            Affine::translate((s.text_origin.x * scale, s.text_origin.y * scale)),
        ),
        Err(err) => tracing::warn!(error = %err, "label text layout failed, drawing box only"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/label.rs"]
mod tests;
