//! Picture: a widget that shows a texture

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::types::{Point, Size};
use vitrine_core::Result;
use vitrine_renderer::{DrawTarget, Drawable, RenderStates, Sprite, Texture};

use crate::widget::{save_state, Widget, WidgetBase};

pub struct Picture {
    base: WidgetBase,
    sprite: Sprite,
}

#[derive(Serialize, Deserialize)]
struct PictureState {
    position: Point,
    size: Size,
    visible: bool,
}

impl Picture {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self {
            base: WidgetBase::new(),
            sprite: Sprite::new(texture),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        self.base.set_position(position);
    }

    pub fn set_size(&mut self, size: Size) {
        self.sprite.set_size(size);
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Drawable for Picture {
    fn is_visible(&self) -> bool {
        self.base.visible()
    }

    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
        let pos = self.base.position();
        target.draw_sprite(&states.translated(pos.x, pos.y), &self.sprite);
    }
}

impl Widget for Picture {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> Size {
        self.sprite.size()
    }

    fn type_name(&self) -> &'static str {
        "Picture"
    }

    fn save(&self) -> Result<String> {
        save_state(&PictureState {
            position: self.base.position(),
            size: self.size(),
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
