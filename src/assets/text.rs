use std::sync::Arc;

use crate::foundation::{
    core::Rgba8,
    error::{ArsnapError, ArsnapResult},
};

/// Shaped text plus the font it was shaped with, ready for glyph rasterization.
#[derive(Clone)]
pub struct PreparedText {
    pub layout: Arc<parley::Layout<Rgba8>>,
    pub font_bytes: Arc<Vec<u8>>,
    pub font_family: String,
}

impl std::fmt::Debug for PreparedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedText")
            .field("font_family", &self.font_family)
            .field("font_bytes", &self.font_bytes.len())
            .field("width", &self.layout.width())
            .field("height", &self.layout.height())
            .finish()
    }
}

/// Parley-backed layout for overlay captions.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    /// Font bytes already registered with `font_ctx`, and their family name.
    registered: Option<(Arc<Vec<u8>>, String)>,
    registrations: usize,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: None,
            registrations: 0,
        }
    }

    /// Family name of the most recently used font, if any.
    pub fn last_family_name(&self) -> Option<&str> {
        self.registered.as_ref().map(|(_, name)| name.as_str())
    }

    /// How many times font bytes were registered with the font collection.
    pub fn font_registrations(&self) -> usize {
        self.registrations
    }

    /// Shape a single unwrapped line of `text` in the first family found in `font_bytes`.
    pub fn layout_line(
        &mut self,
        text: &str,
        font_bytes: Arc<Vec<u8>>,
        size_px: f32,
        brush: Rgba8,
    ) -> ArsnapResult<PreparedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ArsnapError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let font_family = self.family_for(&font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font_family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(PreparedText {
            layout: Arc::new(layout),
            font_bytes,
            font_family,
        })
    }

    fn family_for(&mut self, font_bytes: &Arc<Vec<u8>>) -> ArsnapResult<String> {
        if let Some((bytes, name)) = &self.registered
            && (Arc::ptr_eq(bytes, font_bytes) || bytes == font_bytes)
        {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font_bytes.as_ref().clone()),
            None,
        );
        self.registrations += 1;
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ArsnapError::decode("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ArsnapError::decode("registered font family has no name"))?
            .to_string();
        self.registered = Some((Arc::clone(font_bytes), name.clone()));
        Ok(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
