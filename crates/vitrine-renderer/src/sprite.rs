//! Sprite: a textured quad with source rectangle, size and tint

use std::sync::Arc;

use vitrine_core::types::{Color, Rect, Size};

use crate::texture::Texture;

/// What a widget hands to `draw_sprite`: a texture, the texel region to
/// sample, the destination size and a tint color.
#[derive(Debug, Clone)]
pub struct Sprite {
    texture: Arc<Texture>,
    /// Source region in texels.
    src_rect: Rect,
    /// Destination size in gui-logical units.
    size: Size,
    color: Color,
}

impl Sprite {
    /// Create a sprite showing the whole texture at its natural size.
    pub fn new(texture: Arc<Texture>) -> Self {
        let (w, h) = texture.size();
        Self {
            texture,
            src_rect: Rect::new(0.0, 0.0, w as f32, h as f32),
            size: Size::new(w as f32, h as f32),
            color: Color::WHITE,
        }
    }

    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    /// Select the texel region to sample.
    pub fn set_texture_rect(&mut self, rect: Rect) {
        self.src_rect = rect;
    }

    pub fn texture_rect(&self) -> Rect {
        self.src_rect
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Source rectangle normalized to 0..1 texture coordinates.
    pub(crate) fn uv_rect(&self) -> Rect {
        let (w, h) = self.texture.size();
        let (w, h) = (w as f32, h as f32);
        Rect::new(
            self.src_rect.x / w,
            self.src_rect.y / h,
            self.src_rect.width / w,
            self.src_rect.height / h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TextureId;

    #[test]
    fn new_sprite_covers_whole_texture() {
        let sprite = Sprite::new(Arc::new(Texture::new(TextureId(1), 64, 32)));
        assert_eq!(sprite.texture_rect(), Rect::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!(sprite.size(), Size::new(64.0, 32.0));
        assert_eq!(sprite.uv_rect(), Rect::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn uv_rect_normalizes_sub_region() {
        let mut sprite = Sprite::new(Arc::new(Texture::new(TextureId(1), 100, 50)));
        sprite.set_texture_rect(Rect::new(25.0, 10.0, 50.0, 25.0));
        assert_eq!(sprite.uv_rect(), Rect::new(0.25, 0.2, 0.5, 0.5));
    }
}
