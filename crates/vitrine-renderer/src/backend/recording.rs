//! Recording backend
//!
//! Implements [`RenderBackend`] without touching a GPU: every call is
//! appended to an operation log and every draw keeps its geometry. Used by
//! the integration tests to assert on flush/bind/scissor behavior, and
//! usable for headless measurement.

use vitrine_core::types::Color;
use vitrine_core::Result;

use super::{RenderBackend, TextureId};
use crate::clip::ScissorRect;
use crate::vertex::Vertex;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendOp {
    BeginFrame,
    EndFrame,
    CreateTexture { id: TextureId, width: u32, height: u32 },
    WriteTexture { id: TextureId },
    DestroyTexture { id: TextureId },
    BindTexture { id: TextureId },
    SetScissor { scissor: Option<ScissorRect> },
    SetTransform,
    DrawIndexed { vertex_count: usize, index_count: usize },
}

/// A submitted draw call with the state that was latched when it ran.
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub texture: Option<TextureId>,
    pub scissor: Option<ScissorRect>,
    pub transform: [[f32; 4]; 4],
}

pub struct RecordingBackend {
    size: (u32, u32),
    ops: Vec<BackendOp>,
    draws: Vec<DrawRecord>,
    next_texture: u32,
    bound_texture: Option<TextureId>,
    scissor: Option<ScissorRect>,
    transform: [[f32; 4]; 4],
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ops: Vec::new(),
            draws: Vec::new(),
            next_texture: 1,
            bound_texture: None,
            scissor: None,
            transform: glam::Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Every backend call in order.
    pub fn ops(&self) -> &[BackendOp] {
        &self.ops
    }

    /// Every submitted draw call with its latched state.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// How many times `bind_texture` ran.
    pub fn bind_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, BackendOp::BindTexture { .. }))
            .count()
    }

    /// Forget everything recorded so far; latched state is kept.
    pub fn clear_log(&mut self) {
        self.ops.clear();
        self.draws.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_clear_color(&mut self, _color: Color) {}

    fn begin_frame(&mut self) -> Result<()> {
        self.ops.push(BackendOp::BeginFrame);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.ops.push(BackendOp::EndFrame);
        Ok(())
    }

    fn create_texture(&mut self, width: u32, height: u32, _pixels: &[u8]) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.ops.push(BackendOp::CreateTexture { id, width, height });
        id
    }

    fn write_texture(&mut self, id: TextureId, _width: u32, _height: u32, _pixels: &[u8]) {
        self.ops.push(BackendOp::WriteTexture { id });
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if self.bound_texture == Some(id) {
            self.bound_texture = None;
        }
        self.ops.push(BackendOp::DestroyTexture { id });
    }

    fn bind_texture(&mut self, id: TextureId) {
        self.bound_texture = Some(id);
        self.ops.push(BackendOp::BindTexture { id });
    }

    fn set_scissor(&mut self, scissor: Option<ScissorRect>) {
        self.scissor = scissor;
        self.ops.push(BackendOp::SetScissor { scissor });
    }

    fn set_transform(&mut self, matrix: [[f32; 4]; 4]) {
        self.transform = matrix;
        self.ops.push(BackendOp::SetTransform);
    }

    fn draw_indexed(&mut self, vertices: &[Vertex], indices: &[u32]) {
        self.ops.push(BackendOp::DrawIndexed {
            vertex_count: vertices.len(),
            index_count: indices.len(),
        });
        self.draws.push(DrawRecord {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            texture: self.bound_texture,
            scissor: self.scissor,
            transform: self.transform,
        });
    }
}
