//! Text: a string laid out as glyph quads against a font atlas

use std::sync::Arc;

use vitrine_core::types::{Color, Rect, Size};

use crate::font::FontAtlas;

/// One glyph quad produced by layout: destination rectangle in text-local
/// coordinates plus the atlas region to sample.
#[derive(Debug, Clone, Copy)]
pub struct GlyphQuad {
    pub rect: Rect,
    pub uv: Rect,
}

/// What a widget hands to `draw_text`.
///
/// Owns the string and styling; glyph quads are computed on demand from the
/// font atlas. The origin is the top-left corner of the first line.
#[derive(Clone)]
pub struct Text {
    font: Arc<FontAtlas>,
    string: String,
    character_size: u32,
    fill_color: Color,
    outline_color: Color,
    outline_thickness: f32,
}

impl Text {
    pub fn new(font: Arc<FontAtlas>, string: impl Into<String>) -> Self {
        Self {
            font,
            string: string.into(),
            character_size: 16,
            fill_color: Color::BLACK,
            outline_color: Color::TRANSPARENT,
            outline_thickness: 0.0,
        }
    }

    pub fn font(&self) -> &Arc<FontAtlas> {
        &self.font
    }

    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn set_character_size(&mut self, size: u32) {
        self.character_size = size.max(1);
    }

    pub fn character_size(&self) -> u32 {
        self.character_size
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_outline(&mut self, color: Color, thickness: f32) {
        self.outline_color = color;
        self.outline_thickness = thickness.max(0.0);
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    pub fn outline_thickness(&self) -> f32 {
        self.outline_thickness
    }

    /// Measure the laid-out string: widest line by advance, line count
    /// times the line height.
    pub fn size(&self) -> Size {
        let (_, line_height) = self.font.line_metrics(self.character_size);
        let mut widest: f32 = 0.0;
        let mut line_width: f32 = 0.0;
        let mut lines = 1u32;
        for ch in self.string.chars() {
            if ch == '\n' {
                widest = widest.max(line_width);
                line_width = 0.0;
                lines += 1;
                continue;
            }
            if let Some(glyph) = self.font.glyph(ch, self.character_size) {
                line_width += glyph.advance;
            }
        }
        widest = widest.max(line_width);
        Size::new(widest, lines as f32 * line_height)
    }

    /// Lay the string out as one quad per visible glyph.
    pub(crate) fn layout(&self) -> Vec<GlyphQuad> {
        let (ascent, line_height) = self.font.line_metrics(self.character_size);
        let mut quads = Vec::with_capacity(self.string.len());
        let mut pen_x = 0.0f32;
        let mut baseline = ascent;

        for ch in self.string.chars() {
            if ch == '\n' {
                pen_x = 0.0;
                baseline += line_height;
                continue;
            }
            let Some(glyph) = self.font.glyph(ch, self.character_size) else {
                continue;
            };
            if !glyph.size.is_empty() {
                // Bearing is y-up from the baseline; gui space is y-down.
                let x = pen_x + glyph.bearing.x;
                let y = baseline - (glyph.bearing.y + glyph.size.height);
                quads.push(GlyphQuad {
                    rect: Rect::new(x, y, glyph.size.width, glyph.size.height),
                    uv: glyph.uv,
                });
            }
            pen_x += glyph.advance;
        }
        quads
    }
}
