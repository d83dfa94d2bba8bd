//! Vertex data shared between the CPU-side batch and the GPU pipeline

use bytemuck::{Pod, Zeroable};
use vitrine_core::types::Color;

/// A single vertex as it is copied into the geometry batch.
///
/// Value type with no identity; 20 bytes, tightly packed. The color is
/// carried as four 8-bit channels and expanded to normalized floats by the
/// vertex fetch stage.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [u8; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 2], uv: [f32; 2], color: Color) -> Self {
        Self {
            position,
            uv,
            color: color.to_rgba8(),
        }
    }

    /// Vertex for untextured geometry (sampled against the white texture)
    pub fn solid(position: [f32; 2], color: Color) -> Self {
        Self::new(position, [0.0, 0.0], color)
    }

    /// Vertex buffer layout descriptor
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x2, // position
            1 => Float32x2, // uv
            2 => Unorm8x4   // color
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
    }

    #[test]
    fn solid_vertex_uses_white_texel() {
        let v = Vertex::solid([1.0, 2.0], Color::RED);
        assert_eq!(v.uv, [0.0, 0.0]);
        assert_eq!(v.color, [255, 0, 0, 255]);
    }
}
