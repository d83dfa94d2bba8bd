//! Vitrine renderer
//!
//! The batched render target the widget toolkit draws through. Widget-level
//! draw calls (sprites, text, circles, triangle lists) are converted into
//! vertices, staged into a CPU-side batch and submitted as one indexed draw
//! call per run of geometry sharing texture, clip and transform state. A
//! nested clipping-region stack tracks accumulated scissor rectangles
//! across the widget tree.
//!
//! The GPU is reached through the [`backend::RenderBackend`] trait;
//! [`backend::WgpuBackend`] drives a real device and
//! [`backend::RecordingBackend`] supports headless runs and tests.

pub mod backend;
pub mod batch;
pub mod clip;
pub mod font;
pub mod sprite;
pub mod target;
pub mod text;
pub mod texture;
pub mod vertex;

pub use backend::{RecordingBackend, RenderBackend, TextureId, WgpuBackend};
pub use batch::GeometryBatch;
pub use clip::{ClipStack, ScissorRect};
pub use font::{FontAtlas, GlyphInfo};
pub use sprite::Sprite;
pub use target::{DrawTarget, Drawable, RenderStates, RenderTarget};
pub use text::Text;
pub use texture::{Texture, TextureCache};
pub use vertex::Vertex;
