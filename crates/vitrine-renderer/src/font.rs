//! Font atlas: glyphs rasterized on demand and shelf-packed into one
//! texture
//!
//! Rasterization is done with `fontdue`; the atlas keeps a CPU-side RGBA
//! image (white, coverage in alpha) and lazily uploads it through the
//! backend the first time text using it is drawn, re-uploading whenever new
//! glyphs were added since the last draw.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;
use vitrine_core::types::{Point, Rect, Size};
use vitrine_core::{Result, VitrineError};

use crate::backend::{RenderBackend, TextureId};

/// Atlas texture dimensions. Glyphs that no longer fit are dropped with a
/// warning rather than growing the texture mid-frame.
const ATLAS_SIZE: u32 = 1024;

/// Spacing between packed glyphs, avoids sampling bleed.
const GLYPH_PADDING: u32 = 1;

/// Placement and metrics of one rasterized glyph.
#[derive(Debug, Clone, Copy)]
pub struct GlyphInfo {
    /// Normalized atlas coordinates of the glyph's bitmap.
    pub uv: Rect,
    /// Bitmap size in pixels.
    pub size: Size,
    /// Offset of the bitmap's bottom-left corner from the pen position,
    /// y-up relative to the baseline.
    pub bearing: Point,
    /// Horizontal pen advance.
    pub advance: f32,
}

type GlyphKey = (char, u32);

struct AtlasInner {
    pixels: Vec<u8>,
    next_x: u32,
    next_y: u32,
    row_height: u32,
    glyphs: HashMap<GlyphKey, Option<GlyphInfo>>,
    texture: Option<TextureId>,
    dirty: bool,
    warned_full: bool,
}

impl AtlasInner {
    fn new() -> Self {
        Self {
            pixels: vec![0; (ATLAS_SIZE * ATLAS_SIZE * 4) as usize],
            next_x: 0,
            next_y: 0,
            row_height: 0,
            glyphs: HashMap::new(),
            texture: None,
            dirty: false,
            warned_full: false,
        }
    }
}

/// A font plus the texture atlas of its rasterized glyphs.
pub struct FontAtlas {
    font: fontdue::Font,
    inner: Mutex<AtlasInner>,
}

impl FontAtlas {
    /// Parse a font from raw bytes (TTF/OTF).
    pub fn from_bytes(bytes: &[u8]) -> Result<Arc<Self>> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(VitrineError::font)?;
        Ok(Arc::new(Self {
            font,
            inner: Mutex::new(AtlasInner::new()),
        }))
    }

    /// Load a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Ascent and baseline-to-baseline distance for a character size.
    pub fn line_metrics(&self, character_size: u32) -> (f32, f32) {
        match self.font.horizontal_line_metrics(character_size as f32) {
            Some(m) => (m.ascent, m.new_line_size),
            None => (character_size as f32, character_size as f32 * 1.2),
        }
    }

    /// Rasterize (or fetch) a glyph at the given pixel size.
    ///
    /// Returns `None` when the atlas is full; whitespace yields a zero-size
    /// glyph carrying only its advance.
    pub fn glyph(&self, ch: char, character_size: u32) -> Option<GlyphInfo> {
        let mut inner = self.inner.lock();
        if let Some(cached) = inner.glyphs.get(&(ch, character_size)) {
            return *cached;
        }

        let (metrics, coverage) = self.font.rasterize(ch, character_size as f32);
        let info = pack_glyph(&mut inner, &metrics, &coverage);
        if info.is_none() && !inner.warned_full {
            warn!(atlas_size = ATLAS_SIZE, "font atlas is full, dropping further glyphs");
            inner.warned_full = true;
        }
        inner.glyphs.insert((ch, character_size), info);
        info
    }

    /// Upload the atlas if needed and return its texture id plus whether a
    /// fresh upload happened (callers force a rebind in that case).
    pub(crate) fn ensure_uploaded(&self, backend: &mut dyn RenderBackend) -> (TextureId, bool) {
        let mut inner = self.inner.lock();
        match inner.texture {
            None => {
                let id = backend.create_texture(ATLAS_SIZE, ATLAS_SIZE, &inner.pixels);
                inner.texture = Some(id);
                inner.dirty = false;
                (id, true)
            }
            Some(id) if inner.dirty => {
                backend.write_texture(id, ATLAS_SIZE, ATLAS_SIZE, &inner.pixels);
                inner.dirty = false;
                (id, true)
            }
            Some(id) => (id, false),
        }
    }
}

fn pack_glyph(
    inner: &mut AtlasInner,
    metrics: &fontdue::Metrics,
    coverage: &[u8],
) -> Option<GlyphInfo> {
    let width = metrics.width as u32;
    let height = metrics.height as u32;

    let base = GlyphInfo {
        uv: Rect::new(0.0, 0.0, 0.0, 0.0),
        size: Size::new(width as f32, height as f32),
        bearing: Point::new(metrics.xmin as f32, metrics.ymin as f32),
        advance: metrics.advance_width,
    };
    if width == 0 || height == 0 {
        return Some(base);
    }

    if inner.next_x + width > ATLAS_SIZE {
        inner.next_y += inner.row_height + GLYPH_PADDING;
        inner.next_x = 0;
        inner.row_height = 0;
    }
    if inner.next_y + height > ATLAS_SIZE {
        return None;
    }

    let (x, y) = (inner.next_x, inner.next_y);
    for row in 0..height {
        for col in 0..width {
            let alpha = coverage[(row * width + col) as usize];
            let dst = (((y + row) * ATLAS_SIZE + x + col) * 4) as usize;
            inner.pixels[dst..dst + 4].copy_from_slice(&[255, 255, 255, alpha]);
        }
    }
    inner.next_x += width + GLYPH_PADDING;
    inner.row_height = inner.row_height.max(height);
    inner.dirty = true;

    Some(GlyphInfo {
        uv: Rect::new(
            x as f32 / ATLAS_SIZE as f32,
            y as f32 / ATLAS_SIZE as f32,
            width as f32 / ATLAS_SIZE as f32,
            height as f32 / ATLAS_SIZE as f32,
        ),
        ..base
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: usize, height: usize) -> fontdue::Metrics {
        fontdue::Metrics {
            xmin: 0,
            ymin: 0,
            width,
            height,
            advance_width: width as f32,
            advance_height: 0.0,
            bounds: fontdue::OutlineBounds {
                xmin: 0.0,
                ymin: 0.0,
                width: width as f32,
                height: height as f32,
            },
        }
    }

    #[test]
    fn zero_size_glyph_keeps_advance() {
        let mut inner = AtlasInner::new();
        let m = fontdue::Metrics {
            advance_width: 7.5,
            ..metrics(0, 0)
        };
        let info = pack_glyph(&mut inner, &m, &[]).unwrap();
        assert_eq!(info.size, Size::new(0.0, 0.0));
        assert_eq!(info.advance, 7.5);
        assert!(!inner.dirty);
    }

    #[test]
    fn packing_advances_and_marks_dirty() {
        let mut inner = AtlasInner::new();
        let coverage = vec![128u8; 120];
        let info = pack_glyph(&mut inner, &metrics(10, 12), &coverage).unwrap();
        assert_eq!(inner.next_x, 10 + GLYPH_PADDING);
        assert_eq!(inner.row_height, 12);
        assert!(inner.dirty);
        assert!(info.uv.width > 0.0);
    }

    #[test]
    fn packing_wraps_to_next_row() {
        let mut inner = AtlasInner::new();
        let coverage = vec![255u8; (ATLAS_SIZE * 16) as usize];
        pack_glyph(&mut inner, &metrics(ATLAS_SIZE as usize, 16), &coverage).unwrap();
        let second = pack_glyph(&mut inner, &metrics(8, 8), &vec![255u8; 64]).unwrap();
        assert_eq!(inner.next_y, 16 + GLYPH_PADDING);
        assert!(second.uv.y > 0.0);
    }

    #[test]
    fn full_atlas_rejects_glyph() {
        let mut inner = AtlasInner::new();
        inner.next_y = ATLAS_SIZE - 4;
        let coverage = vec![255u8; 64];
        assert!(pack_glyph(&mut inner, &metrics(8, 8), &coverage).is_none());
    }
}
