//! Widget library for the Vitrine toolkit
//!
//! Conventional retained-mode widgets drawing through the render target's
//! `DrawTarget` surface. Widgets are owned by a [`Group`] arena and polled
//! for callbacks; appearance comes from textures loaded via RON config
//! files.

pub mod bitmap_button;
pub mod checkbox;
pub mod config;
pub mod group;
pub mod loading_bar;
pub mod picture;
pub mod sprite_sheet;
pub mod widget;

pub use bitmap_button::BitmapButton;
pub use checkbox::Checkbox;
pub use config::{BitmapButtonConfig, CheckboxConfig, LoadingBarConfig, LoadingBarSkin};
pub use group::{Group, WidgetKey};
pub use loading_bar::LoadingBar;
pub use picture::Picture;
pub use sprite_sheet::SpriteSheet;
pub use widget::{Widget, WidgetBase};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::group::{Group, WidgetKey};
    pub use crate::widget::{Widget, WidgetBase};
    pub use crate::{BitmapButton, Checkbox, LoadingBar, Picture, SpriteSheet};
}
