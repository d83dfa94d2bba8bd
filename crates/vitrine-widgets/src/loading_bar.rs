//! LoadingBar widget
//!
//! A back image with a front image drawn over its left part, proportional
//! to the current value. The skin is either a single back/front pair or
//! split into left/middle/right parts where the caps keep their aspect
//! ratio and only the middle stretches.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::event::CallbackTrigger;
use vitrine_core::types::{Point, Rect, Size};
use vitrine_core::Result;
use vitrine_renderer::backend::RenderBackend;
use vitrine_renderer::{DrawTarget, Drawable, RenderStates, Sprite, Texture, TextureCache};

use crate::config::{load_config, resolve_path, LoadingBarConfig, LoadingBarSkin};
use crate::widget::{save_state, Widget, WidgetBase};

enum Skin {
    Simple {
        back: Sprite,
        front: Sprite,
    },
    Split {
        back: [Sprite; 3],
        front: [Sprite; 3],
        /// Widths of the left/middle/right parts at the current size.
        part_widths: [f32; 3],
    },
}

pub struct LoadingBar {
    base: WidgetBase,
    minimum: u32,
    maximum: u32,
    value: u32,
    size: Size,
    skin: Skin,
}

#[derive(Serialize, Deserialize)]
struct LoadingBarState {
    position: Point,
    minimum: u32,
    maximum: u32,
    value: u32,
    visible: bool,
}

impl LoadingBar {
    /// Create a bar from a single back/front texture pair.
    pub fn new(back: Arc<Texture>, front: Arc<Texture>) -> Self {
        let (w, h) = back.size();
        let mut bar = Self {
            base: WidgetBase::new(),
            minimum: 0,
            maximum: 100,
            value: 0,
            size: Size::new(w as f32, h as f32),
            skin: Skin::Simple {
                back: Sprite::new(back),
                front: Sprite::new(front),
            },
        };
        bar.recalculate_front();
        bar
    }

    /// Create a bar from split left/middle/right textures.
    pub fn new_split(back: [Arc<Texture>; 3], front: [Arc<Texture>; 3]) -> Self {
        let width: u32 = back.iter().map(|t| t.width()).sum();
        let height = back[1].height();
        let mut bar = Self {
            base: WidgetBase::new(),
            minimum: 0,
            maximum: 100,
            value: 0,
            size: Size::new(width as f32, height as f32),
            skin: Skin::Split {
                back: back.map(Sprite::new),
                front: front.map(Sprite::new),
                part_widths: [0.0; 3],
            },
        };
        bar.recalculate_front();
        bar
    }

    /// Build a bar from a config file, loading its textures through the
    /// cache.
    pub fn from_config(
        backend: &mut dyn RenderBackend,
        cache: &TextureCache,
        config_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config: LoadingBarConfig = load_config(config_path)?;

        match config.skin {
            LoadingBarSkin::Simple { back, front } => {
                let back = cache.load(backend, resolve_path(config_path, &back))?;
                let front = cache.load(backend, resolve_path(config_path, &front))?;
                Ok(Self::new(back, front))
            }
            LoadingBarSkin::Split { back, front } => {
                let mut load = |paths: [std::path::PathBuf; 3]| -> Result<[Arc<Texture>; 3]> {
                    let [l, m, r] = paths;
                    Ok([
                        cache.load(backend, resolve_path(config_path, &l))?,
                        cache.load(backend, resolve_path(config_path, &m))?,
                        cache.load(backend, resolve_path(config_path, &r))?,
                    ])
                };
                let back = load(back)?;
                let front = load(front)?;
                Ok(Self::new_split(back, front))
            }
        }
    }

    pub fn set_position(&mut self, position: Point) {
        self.base.set_position(position);
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width.abs(), size.height.abs());
        self.recalculate_front();
    }

    /// The minimum can never exceed the maximum; both drag the value with
    /// them when it falls outside the range.
    pub fn set_minimum(&mut self, minimum: u32) {
        self.minimum = minimum;
        if self.minimum > self.maximum {
            self.maximum = self.minimum;
        }
        if self.value < self.minimum {
            self.value = self.minimum;
        }
        self.recalculate_front();
    }

    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        if self.maximum < self.minimum {
            self.minimum = self.maximum;
        }
        if self.value > self.maximum {
            self.value = self.maximum;
        }
        self.recalculate_front();
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value.clamp(self.minimum, self.maximum);
        self.recalculate_front();
    }

    /// Increment the value by one if it is below the maximum, queueing a
    /// `ValueChanged` callback, and return the new value.
    pub fn increment_value(&mut self) -> u32 {
        if self.value < self.maximum {
            self.value += 1;
            self.base
                .push_callback_value(CallbackTrigger::ValueChanged, self.value);
        }
        self.recalculate_front();
        self.value
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Filled fraction of the bar.
    fn ratio(&self) -> f32 {
        if self.maximum > self.minimum {
            (self.value - self.minimum) as f32 / (self.maximum - self.minimum) as f32
        } else {
            1.0
        }
    }

    // Resize the back sprites to the bar size and cut the front sprites
    // down to the filled fraction, both in texels and display size.
    fn recalculate_front(&mut self) {
        let ratio = self.ratio();
        let size = self.size;

        match &mut self.skin {
            Skin::Simple { back, front } => {
                back.set_size(size);
                let (tex_w, tex_h) = front.texture().size();
                front.set_texture_rect(Rect::new(0.0, 0.0, tex_w as f32 * ratio, tex_h as f32));
                front.set_size(Size::new(size.width * ratio, size.height));
            }
            Skin::Split {
                back,
                front,
                part_widths,
            } => {
                // Caps scale with the bar height; the middle absorbs the
                // remaining width (dropped entirely when the bar is too
                // narrow).
                let scale_y = size.height / back[1].texture().height() as f32;
                let left_w = back[0].texture().width() as f32 * scale_y;
                let right_w = back[2].texture().width() as f32 * scale_y;
                let middle_w = (size.width - left_w - right_w).max(0.0);
                *part_widths = [left_w, middle_w, right_w];

                for (sprite, width) in back.iter_mut().zip(*part_widths) {
                    sprite.set_size(Size::new(width, size.height));
                }

                let total = left_w + middle_w + right_w;
                let mut remaining = total * ratio;
                for (sprite, width) in front.iter_mut().zip(*part_widths) {
                    let visible = remaining.min(width);
                    remaining -= visible;
                    let (tex_w, tex_h) = sprite.texture().size();
                    let fraction = if width > 0.0 { visible / width } else { 0.0 };
                    sprite.set_texture_rect(Rect::new(
                        0.0,
                        0.0,
                        tex_w as f32 * fraction,
                        tex_h as f32,
                    ));
                    sprite.set_size(Size::new(visible, size.height));
                }
            }
        }
    }
}

impl Drawable for LoadingBar {
    fn is_visible(&self) -> bool {
        self.base.visible()
    }

    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
        let pos = self.base.position();
        let states = states.translated(pos.x, pos.y);

        match &self.skin {
            Skin::Simple { back, front } => {
                target.draw_sprite(&states, back);
                target.draw_sprite(&states, front);
            }
            Skin::Split {
                back,
                front,
                part_widths,
            } => {
                let mut x = 0.0;
                for ((back, front), width) in back.iter().zip(front).zip(*part_widths) {
                    let part_states = states.translated(x, 0.0);
                    target.draw_sprite(&part_states, back);
                    target.draw_sprite(&part_states, front);
                    x += width;
                }
            }
        }
    }
}

impl Widget for LoadingBar {
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
        "LoadingBar"
    }

    fn save(&self) -> Result<String> {
        save_state(&LoadingBarState {
            position: self.base.position(),
            minimum: self.minimum,
            maximum: self.maximum,
            value: self.value,
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
