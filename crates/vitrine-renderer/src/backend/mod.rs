//! Graphics backend abstraction
//!
//! The render target talks to the GPU exclusively through [`RenderBackend`].
//! This decouples the batching core from the graphics API: [`WgpuBackend`]
//! drives a real device, [`RecordingBackend`] records every call for
//! headless runs and tests.
//!
//! The trait is stateful in the way immediate-mode graphics APIs are:
//! `bind_texture`, `set_scissor` and `set_transform` latch state that the
//! next `draw_indexed` submission uses.

use vitrine_core::types::Color;
use vitrine_core::Result;

use crate::clip::ScissorRect;
use crate::vertex::Vertex;

pub mod recording;
pub mod wgpu;

pub use self::recording::{BackendOp, RecordingBackend};
pub use self::wgpu::WgpuBackend;

/// Backend texture handle.
///
/// Small integer ids are reused across allocations, so equality means
/// "same current texture", never "same texture ever".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

pub trait RenderBackend {
    /// Current drawable surface size in device pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Resize the drawable surface.
    fn resize(&mut self, width: u32, height: u32);

    /// Color the frame is cleared to at `begin_frame`.
    fn set_clear_color(&mut self, color: Color);

    /// Acquire and clear the next frame.
    fn begin_frame(&mut self) -> Result<()>;

    /// Present the current frame.
    fn end_frame(&mut self) -> Result<()>;

    /// Upload an RGBA8 image and return its handle.
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextureId;

    /// Replace the contents of an existing texture.
    fn write_texture(&mut self, id: TextureId, width: u32, height: u32, pixels: &[u8]);

    /// Release a texture. The id may be reused by a later `create_texture`.
    fn destroy_texture(&mut self, id: TextureId);

    /// Make `id` the texture sampled by subsequent draws.
    fn bind_texture(&mut self, id: TextureId);

    /// Set the scissor rectangle for subsequent draws; `None` disables
    /// scissoring.
    fn set_scissor(&mut self, scissor: Option<ScissorRect>);

    /// Upload the vertex transform used by subsequent draws.
    fn set_transform(&mut self, matrix: [[f32; 4]; 4]);

    /// Upload the given geometry and submit one indexed draw call covering
    /// all of it, under the currently latched texture/scissor/transform.
    fn draw_indexed(&mut self, vertices: &[Vertex], indices: &[u32]);
}
