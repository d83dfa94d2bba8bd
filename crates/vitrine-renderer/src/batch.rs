//! CPU-side geometry staging for the render target
//!
//! All draw primitives funnel their triangles through a [`GeometryBatch`].
//! The batch only ever holds geometry that shares texture, clip and
//! transform state; the render target flushes it before any state change,
//! so one flush is always exactly one indexed draw call.

use crate::vertex::Vertex;

/// Expanding vertex/index staging arrays.
///
/// Capacity grows as geometry is appended and is retained across
/// [`clear`](GeometryBatch::clear) calls, amortizing allocation cost over
/// the lifetime of the render target. It is never reduced mid-frame.
#[derive(Debug, Default)]
pub struct GeometryBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl GeometryBatch {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
            indices: Vec::with_capacity(1536),
        }
    }

    /// Append vertices with an explicit index list.
    ///
    /// Indices are offset by the current vertex count so one draw call can
    /// reference the combined buffer.
    pub fn append(&mut self, vertices: &[Vertex], indices: &[u32]) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|&i| offset + i));
    }

    /// Append vertices without an index list, treating every 3 vertices as
    /// one triangle.
    ///
    /// The vertex count must be a multiple of 3; violating this is a
    /// usage-contract error.
    pub fn append_unindexed(&mut self, vertices: &[Vertex]) {
        debug_assert!(
            vertices.len() % 3 == 0,
            "unindexed geometry requires a multiple of 3 vertices, got {}",
            vertices.len()
        );
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(offset..offset + vertices.len() as u32);
    }

    /// Clear staged geometry, retaining capacity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::types::Color;

    fn v(x: f32, y: f32) -> Vertex {
        Vertex::solid([x, y], Color::WHITE)
    }

    #[test]
    fn append_offsets_indices() {
        let mut batch = GeometryBatch::new();
        batch.append(&[v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)], &[0, 1, 2]);
        batch.append(&[v(2.0, 0.0), v(3.0, 0.0), v(2.0, 1.0)], &[0, 1, 2]);

        assert_eq!(batch.vertex_count(), 6);
        assert_eq!(batch.indices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn append_quad_indices() {
        let mut batch = GeometryBatch::new();
        batch.append(&[v(0.0, 0.0)], &[0]);
        batch.append(
            &[v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)],
            &[0, 1, 2, 0, 2, 3],
        );
        assert_eq!(batch.indices(), &[0, 1, 2, 3, 1, 3, 4]);
    }

    #[test]
    fn unindexed_generates_linear_sequence() {
        let mut batch = GeometryBatch::new();
        batch.append_unindexed(&[
            v(0.0, 0.0),
            v(1.0, 0.0),
            v(0.0, 1.0),
            v(2.0, 0.0),
            v(3.0, 0.0),
            v(2.0, 1.0),
        ]);
        assert_eq!(batch.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(batch.triangle_count(), 2);
    }

    #[test]
    fn unindexed_offsets_after_indexed_append() {
        let mut batch = GeometryBatch::new();
        batch.append(&[v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)], &[0, 1, 2]);
        batch.append_unindexed(&[v(5.0, 5.0), v(6.0, 5.0), v(5.0, 6.0)]);
        assert_eq!(batch.indices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "multiple of 3")]
    #[cfg(debug_assertions)]
    fn unindexed_rejects_partial_triangle() {
        let mut batch = GeometryBatch::new();
        batch.append_unindexed(&[v(0.0, 0.0), v(1.0, 0.0)]);
    }

    #[test]
    fn clear_retains_capacity() {
        let mut batch = GeometryBatch::new();
        for i in 0..100 {
            batch.append_unindexed(&[v(i as f32, 0.0), v(i as f32, 1.0), v(i as f32, 2.0)]);
        }
        let vertex_cap = batch.vertices.capacity();
        let index_cap = batch.indices.capacity();

        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.vertices.capacity(), vertex_cap);
        assert_eq!(batch.indices.capacity(), index_cap);
    }
}
