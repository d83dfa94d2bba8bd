//! Vitrine - a retained-mode GUI widget toolkit
//!
//! Vitrine pairs a small widget library with a batched render target:
//! widget draw calls are staged into texture/clip-homogeneous geometry
//! batches and submitted as one GPU draw call each. The GPU is reached
//! through a backend trait with a wgpu implementation and a recording
//! implementation for headless use.
//!
//! ```no_run
//! use vitrine::prelude::*;
//! use vitrine::renderer::{RecordingBackend, RenderTarget};
//!
//! let mut target = RenderTarget::new(RecordingBackend::new(800, 600));
//! target.set_view(Rect::new(0.0, 0.0, 800.0, 600.0), Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! let mut gui = Group::new();
//! // widgets are added to the group, then the whole tree is drawn
//! target.draw_gui(&gui).unwrap();
//! ```

pub use vitrine_core as core;
pub use vitrine_renderer as renderer;
pub use vitrine_widgets as widgets;

/// Unified prelude module that exports all commonly used types
pub mod prelude {
    pub use vitrine_core::prelude::*;
    pub use vitrine_renderer::{
        DrawTarget, Drawable, FontAtlas, RenderStates, RenderTarget, Sprite, Text, Texture,
        TextureCache,
    };
    pub use vitrine_widgets::prelude::*;
}

/// Initialize logging for the toolkit.
pub fn init_logging() {
    vitrine_core::logging::init();
}

/// Toolkit version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
