//! BitmapButton widget: a button with an icon next to its caption

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::event::CallbackTrigger;
use vitrine_core::types::{Color, Point, Size};
use vitrine_core::Result;
use vitrine_renderer::backend::RenderBackend;
use vitrine_renderer::{DrawTarget, Drawable, FontAtlas, RenderStates, Sprite, Text, Texture, TextureCache};

use crate::config::{load_config, resolve_path, BitmapButtonConfig};
use crate::widget::{save_state, Widget, WidgetBase};

pub struct BitmapButton {
    base: WidgetBase,
    size: Size,
    background: Sprite,
    glyph: Option<Sprite>,
    text: Option<Text>,
    text_color: Color,
    /// Icon height as a fraction of the button height; 0 keeps the icon's
    /// natural size.
    relative_glyph_height: f32,
}

#[derive(Serialize, Deserialize)]
struct BitmapButtonState {
    position: Point,
    size: Size,
    text: Option<String>,
    visible: bool,
}

impl BitmapButton {
    pub fn new(background: Arc<Texture>) -> Self {
        let (w, h) = background.size();
        Self {
            base: WidgetBase::new(),
            size: Size::new(w as f32, h as f32),
            background: Sprite::new(background),
            glyph: None,
            text: None,
            text_color: Color::BLACK,
            relative_glyph_height: 0.0,
        }
    }

    pub fn from_config(
        backend: &mut dyn RenderBackend,
        cache: &TextureCache,
        config_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config: BitmapButtonConfig = load_config(config_path)?;
        let background =
            cache.load(backend, resolve_path(config_path, &config.background_image))?;
        let mut button = Self::new(background);
        button.text_color = config.text_color;
        Ok(button)
    }

    pub fn set_position(&mut self, position: Point) {
        self.base.set_position(position);
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width.abs(), size.height.abs());
        self.background.set_size(self.size);
        self.recalculate_glyph_size();
        self.apply_text_size();
    }

    /// Set the icon displayed next to the caption.
    pub fn set_image(&mut self, image: Arc<Texture>) {
        self.glyph = Some(Sprite::new(image));
        self.recalculate_glyph_size();
    }

    pub fn image(&self) -> Option<&Sprite> {
        self.glyph.as_ref()
    }

    /// Icon height relative to the button height, 0..=1. Passing 0 keeps
    /// the icon's natural size regardless of the button size.
    pub fn set_image_scaling(&mut self, relative_height: f32) {
        self.relative_glyph_height = relative_height.clamp(0.0, 1.0);
        self.recalculate_glyph_size();
    }

    pub fn image_scaling(&self) -> f32 {
        self.relative_glyph_height
    }

    pub fn set_text(&mut self, font: Arc<FontAtlas>, string: impl Into<String>) {
        let mut text = Text::new(font, string);
        text.set_fill_color(self.text_color);
        self.text = Some(text);
        self.apply_text_size();
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.string())
    }

    /// Queue a `Clicked` callback, if enabled.
    pub fn click(&mut self) {
        if self.base.enabled() {
            self.base.push_callback(CallbackTrigger::Clicked);
        }
    }

    fn recalculate_glyph_size(&mut self) {
        let Some(glyph) = &mut self.glyph else { return };
        let (tex_w, tex_h) = glyph.texture().size();
        if self.relative_glyph_height > 0.0 {
            let height = self.relative_glyph_height * self.size.height;
            let width = height * tex_w as f32 / tex_h as f32;
            glyph.set_size(Size::new(width, height));
        } else {
            glyph.set_size(Size::new(tex_w as f32, tex_h as f32));
        }
    }

    fn apply_text_size(&mut self) {
        if let Some(text) = &mut self.text {
            text.set_character_size(((self.size.height * 0.7) as u32).max(1));
        }
    }
}

impl Drawable for BitmapButton {
    fn is_visible(&self) -> bool {
        self.base.visible()
    }

    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
        let pos = self.base.position();
        let states = states.translated(pos.x, pos.y);
        target.draw_sprite(&states, &self.background);

        let margin = self.size.height * 0.15;
        match (&self.glyph, &self.text) {
            (Some(glyph), None) => {
                // Centered when there is no caption.
                let x = (self.size.width - glyph.size().width) / 2.0;
                let y = (self.size.height - glyph.size().height) / 2.0;
                target.draw_sprite(&states.translated(x, y), glyph);
            }
            (Some(glyph), Some(text)) => {
                let glyph_y = (self.size.height - glyph.size().height) / 2.0;
                target.draw_sprite(&states.translated(margin, glyph_y), glyph);
                let text_x = margin * 2.0 + glyph.size().width;
                let text_y = (self.size.height - text.size().height) / 2.0;
                target.draw_text(&states.translated(text_x, text_y), text);
            }
            (None, Some(text)) => {
                let text_x = (self.size.width - text.size().width) / 2.0;
                let text_y = (self.size.height - text.size().height) / 2.0;
                target.draw_text(&states.translated(text_x, text_y), text);
            }
            (None, None) => {}
        }
    }
}

impl Widget for BitmapButton {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> Size {
        self.size
    }

    fn type_name(&self) -> &'static str {
        "BitmapButton"
    }

    fn save(&self) -> Result<String> {
        save_state(&BitmapButtonState {
            position: self.base.position(),
            size: self.size,
            text: self.text.as_ref().map(|t| t.string().to_owned()),
            visible: self.base.visible(),
        })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_renderer::TextureId;

    fn button() -> BitmapButton {
        BitmapButton::new(Arc::new(Texture::new(TextureId(1), 100, 40)))
    }

    #[test]
    fn natural_glyph_size_when_scaling_is_zero() {
        let mut button = button();
        button.set_image(Arc::new(Texture::new(TextureId(2), 16, 16)));
        button.set_size(Size::new(200.0, 80.0));
        assert_eq!(button.image().unwrap().size(), Size::new(16.0, 16.0));
    }

    #[test]
    fn relative_scaling_tracks_button_height() {
        let mut button = button();
        button.set_image(Arc::new(Texture::new(TextureId(2), 32, 16)));
        button.set_image_scaling(0.5);
        button.set_size(Size::new(200.0, 80.0));
        // Half the button height, aspect ratio preserved (2:1).
        assert_eq!(button.image().unwrap().size(), Size::new(80.0, 40.0));
    }

    #[test]
    fn scaling_is_clamped_to_unit_range() {
        let mut button = button();
        button.set_image_scaling(3.0);
        assert_eq!(button.image_scaling(), 1.0);
    }

    #[test]
    fn click_queues_callback_when_enabled() {
        let mut button = button();
        button.click();
        button.base_mut().set_enabled(false);
        button.click();
        let callbacks = button.base_mut().take_callbacks();
        assert_eq!(callbacks.len(), 1);
        assert_eq!(callbacks[0].trigger, CallbackTrigger::Clicked);
    }
}
