//! Checkbox widget

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::event::CallbackTrigger;
use vitrine_core::types::{Color, Point, Size};
use vitrine_core::Result;
use vitrine_renderer::backend::RenderBackend;
use vitrine_renderer::{DrawTarget, Drawable, FontAtlas, RenderStates, Sprite, Text, Texture, TextureCache};

use crate::config::{load_config, resolve_path, CheckboxConfig};
use crate::widget::{save_state, Widget, WidgetBase};

/// A checkbox with per-state textures and an optional label.
///
/// State changes queue [`CallbackTrigger::Checked`] /
/// [`CallbackTrigger::Unchecked`] callbacks on actual transitions only.
pub struct Checkbox {
    base: WidgetBase,
    checked: bool,
    mouse_hover: bool,
    focused: bool,
    size: Size,
    unchecked_sprite: Sprite,
    checked_sprite: Sprite,
    hover_sprite: Option<Sprite>,
    focused_sprite: Option<Sprite>,
    text: Option<Text>,
    /// 0 means the character size follows the checkbox height.
    text_size: u32,
    text_color: Color,
}

#[derive(Serialize, Deserialize)]
struct CheckboxState {
    position: Point,
    checked: bool,
    text: Option<String>,
    visible: bool,
}

impl Checkbox {
    /// Create a checkbox from its two required textures. The initial size
    /// is the unchecked texture's natural size.
    pub fn new(unchecked: Arc<Texture>, checked: Arc<Texture>) -> Self {
        let (w, h) = unchecked.size();
        Self {
            base: WidgetBase::new(),
            checked: false,
            mouse_hover: false,
            focused: false,
            size: Size::new(w as f32, h as f32),
            unchecked_sprite: Sprite::new(unchecked),
            checked_sprite: Sprite::new(checked),
            hover_sprite: None,
            focused_sprite: None,
            text: None,
            text_size: 0,
            text_color: Color::BLACK,
        }
    }

    /// Build a checkbox from a config file, loading its textures through
    /// the cache.
    pub fn from_config(
        backend: &mut dyn RenderBackend,
        cache: &TextureCache,
        config_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config: CheckboxConfig = load_config(config_path)?;

        let load = |backend: &mut dyn RenderBackend, image: &Path| {
            cache.load(backend, resolve_path(config_path, image))
        };
        let unchecked = load(backend, &config.unchecked_image)?;
        let checked = load(backend, &config.checked_image)?;
        let mut checkbox = Self::new(unchecked, checked);
        if let Some(image) = &config.hover_image {
            checkbox.hover_sprite = Some(Sprite::new(load(backend, image)?));
        }
        if let Some(image) = &config.focused_image {
            checkbox.focused_sprite = Some(Sprite::new(load(backend, image)?));
        }
        checkbox.text_color = config.text_color;
        Ok(checkbox)
    }

    pub fn set_position(&mut self, position: Point) {
        self.base.set_position(position);
    }

    pub fn set_size(&mut self, size: Size) {
        // Negative sizes are folded to their absolute value.
        let size = Size::new(size.width.abs(), size.height.abs());
        self.size = size;
        for sprite in self.sprites_mut() {
            sprite.set_size(size);
        }
        if self.text_size == 0 {
            self.apply_text_size();
        }
    }

    pub fn check(&mut self) {
        if !self.checked {
            self.base.push_callback(CallbackTrigger::Checked);
        }
        self.checked = true;
    }

    pub fn uncheck(&mut self) {
        if self.checked {
            self.base.push_callback(CallbackTrigger::Unchecked);
        }
        self.checked = false;
    }

    pub fn toggle(&mut self) {
        if self.checked {
            self.uncheck();
        } else {
            self.check();
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Toggle in response to a click, if enabled.
    pub fn click(&mut self) {
        if self.base.enabled() {
            self.toggle();
        }
    }

    pub fn set_hover(&mut self, hover: bool) {
        self.mouse_hover = hover;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Set the label. Character size follows [`set_text_size`]; the
    /// default tracks the checkbox height.
    pub fn set_text(&mut self, font: Arc<FontAtlas>, string: impl Into<String>) {
        let mut text = Text::new(font, string);
        text.set_fill_color(self.text_color);
        self.text = Some(text);
        self.apply_text_size();
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.string())
    }

    /// Fixed character size for the label; 0 returns to auto-sizing.
    pub fn set_text_size(&mut self, size: u32) {
        self.text_size = size;
        self.apply_text_size();
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
        if let Some(text) = &mut self.text {
            text.set_fill_color(color);
        }
    }

    fn apply_text_size(&mut self) {
        let size = if self.text_size == 0 {
            self.size.height as u32
        } else {
            self.text_size
        };
        if let Some(text) = &mut self.text {
            text.set_character_size(size.max(1));
        }
    }

    fn sprites_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        [
            Some(&mut self.unchecked_sprite),
            Some(&mut self.checked_sprite),
            self.hover_sprite.as_mut(),
            self.focused_sprite.as_mut(),
        ]
        .into_iter()
        .flatten()
    }
}

impl Drawable for Checkbox {
    fn is_visible(&self) -> bool {
        self.base.visible()
    }

    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
        let pos = self.base.position();
        let states = states.translated(pos.x, pos.y);

        let box_sprite = if self.checked {
            &self.checked_sprite
        } else {
            &self.unchecked_sprite
        };
        target.draw_sprite(&states, box_sprite);

        if self.mouse_hover {
            if let Some(hover) = &self.hover_sprite {
                target.draw_sprite(&states, hover);
            }
        }
        if self.focused {
            if let Some(focused) = &self.focused_sprite {
                target.draw_sprite(&states, focused);
            }
        }

        if let Some(text) = &self.text {
            let text_y = (self.size.height - text.size().height) / 2.0;
            target.draw_text(&states.translated(self.size.width * 1.1, text_y), text);
        }
    }
}

impl Widget for Checkbox {
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
        "Checkbox"
    }

    fn save(&self) -> Result<String> {
        save_state(&CheckboxState {
            position: self.base.position(),
            checked: self.checked,
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
    use vitrine_renderer::TextureId;

    fn checkbox() -> Checkbox {
        Checkbox::new(
            Arc::new(Texture::new(TextureId(1), 32, 32)),
            Arc::new(Texture::new(TextureId(2), 32, 32)),
        )
    }

    #[test]
    fn check_fires_callback_only_on_transition() {
        let mut cb = checkbox();
        cb.check();
        cb.check();
        let callbacks = cb.base_mut().take_callbacks();
        assert_eq!(callbacks.len(), 1);
        assert_eq!(callbacks[0].trigger, CallbackTrigger::Checked);
    }

    #[test]
    fn toggle_alternates_and_reports() {
        let mut cb = checkbox();
        cb.toggle();
        assert!(cb.is_checked());
        cb.toggle();
        assert!(!cb.is_checked());
        let triggers: Vec<_> = cb
            .base_mut()
            .take_callbacks()
            .into_iter()
            .map(|c| c.trigger)
            .collect();
        assert_eq!(triggers, vec![CallbackTrigger::Checked, CallbackTrigger::Unchecked]);
    }

    #[test]
    fn disabled_checkbox_ignores_clicks() {
        let mut cb = checkbox();
        cb.base_mut().set_enabled(false);
        cb.click();
        assert!(!cb.is_checked());
        assert!(cb.base_mut().take_callbacks().is_empty());
    }

    #[test]
    fn negative_size_is_folded_positive() {
        let mut cb = checkbox();
        cb.set_size(Size::new(-40.0, -20.0));
        assert_eq!(cb.size(), Size::new(40.0, 20.0));
    }
}
