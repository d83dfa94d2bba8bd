//! The render target façade
//!
//! Widgets and containers draw exclusively through [`DrawTarget`];
//! [`RenderTarget`] implements it on top of a [`RenderBackend`] by staging
//! geometry into a [`GeometryBatch`] and flushing it whenever the next
//! primitive needs a different texture, clip rectangle or transform than
//! the staged geometry. A batch is therefore always state-homogeneous and
//! one flush is exactly one indexed draw call.

use glam::Mat4;
use vitrine_core::types::{Color, Rect, Transform};
use vitrine_core::Result;

use crate::backend::{RenderBackend, TextureId};
use crate::batch::GeometryBatch;
use crate::clip::{ClipStack, ScissorRect};
use crate::sprite::Sprite;
use crate::text::Text;
use crate::vertex::Vertex;

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Render state threaded through the widget tree: the accumulated
/// transform from the root down to the widget being drawn.
#[derive(Debug, Clone, Default)]
pub struct RenderStates {
    pub transform: Transform,
}

impl RenderStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// States with an additional translation applied after `self`.
    pub fn translated(&self, x: f32, y: f32) -> Self {
        Self {
            transform: self.transform.combine(&Transform::translate(x, y)),
        }
    }

    /// States with an additional transform applied after `self`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            transform: self.transform.combine(transform),
        }
    }
}

/// Anything the render target can draw: widgets, containers, the gui root.
pub trait Drawable {
    fn is_visible(&self) -> bool {
        true
    }

    /// Issue draw calls back into the target. Collaboration boundary, not
    /// an internal algorithm: implementations only ever use the
    /// [`DrawTarget`] surface.
    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates);
}

/// The drawing surface widgets see.
pub trait DrawTarget {
    /// Draw a widget if it is visible.
    fn draw_widget(&mut self, states: &RenderStates, widget: &dyn Drawable);

    /// Draw a textured quad.
    fn draw_sprite(&mut self, states: &RenderStates, sprite: &Sprite);

    /// Draw a text object, one quad per glyph from its font atlas.
    fn draw_text(&mut self, states: &RenderStates, text: &Text);

    /// Draw a circle of the given diameter with its top-left bounding
    /// corner at the local origin. A positive border thickness rings the
    /// outside of the circle.
    fn draw_circle(
        &mut self,
        states: &RenderStates,
        size: f32,
        background_color: Color,
        border_thickness: f32,
        border_color: Color,
    );

    /// Draw one or more triangles using the colors specified in the
    /// vertices. Without an index list the vertex count must be a multiple
    /// of 3 and every 3 vertices form one triangle.
    fn draw_triangles(&mut self, states: &RenderStates, vertices: &[Vertex], indices: Option<&[u32]>);

    /// Add another clipping region. Contents are only shown in the
    /// intersection of all added regions. Every call must have a matching
    /// `remove_clipping_layer`.
    fn add_clipping_layer(&mut self, states: &RenderStates, rect: Rect);

    /// Remove the most recently added clipping region.
    fn remove_clipping_layer(&mut self);
}

/// Render target that batches widget geometry into GPU draw calls.
///
/// Owned by the rendering thread; single-threaded and synchronous
/// throughout. GPU resources live as long as the target does.
pub struct RenderTarget<B: RenderBackend> {
    backend: B,
    batch: GeometryBatch,
    clip: ClipStack,
    view: Rect,
    viewport: Rect,
    projection: Transform,
    white_texture: TextureId,
    /// Last texture bound on the backend, compared by value to avoid
    /// redundant binds.
    bound_texture: Option<TextureId>,
    /// State the currently staged geometry requires.
    batch_texture: TextureId,
    batch_scissor: Option<ScissorRect>,
    batch_transform: Mat4,
}

impl<B: RenderBackend> RenderTarget<B> {
    /// Wrap a backend. Creates the internal 1x1 white texture used by
    /// untextured primitives.
    pub fn new(mut backend: B) -> Self {
        let white_texture = backend.create_texture(1, 1, &[255, 255, 255, 255]);
        let (w, h) = backend.surface_size();
        let full = Rect::new(0.0, 0.0, w as f32, h as f32);
        let mut target = Self {
            backend,
            batch: GeometryBatch::new(),
            clip: ClipStack::new(),
            view: full,
            viewport: full,
            projection: Transform::identity(),
            white_texture,
            bound_texture: None,
            batch_texture: white_texture,
            batch_scissor: None,
            batch_transform: Mat4::IDENTITY,
        };
        target.recompute_projection();
        target
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Map `view` (the visible gui-logical area) onto `viewport` (the
    /// target pixel area). Must be called before drawing a frame.
    pub fn set_view(&mut self, view: Rect, viewport: Rect) {
        self.view = view;
        self.viewport = viewport;
        self.recompute_projection();
    }

    pub fn view(&self) -> Rect {
        self.view
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Propagate a window resize to the backend.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
        self.recompute_projection();
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.backend.set_clear_color(color);
    }

    /// Draw the whole gui: acquires a frame, resets batch and clip state,
    /// walks the tree from `root` and flushes what remains.
    pub fn draw_gui(&mut self, root: &dyn Drawable) -> Result<()> {
        self.backend.begin_frame()?;
        self.clip.clear();
        self.backend.set_scissor(None);
        self.bound_texture = None;

        let states = RenderStates::default();
        self.draw_widget(&states, root);
        self.flush();

        debug_assert!(self.clip.is_empty(), "unbalanced clipping layers at end of frame");
        self.backend.end_frame()
    }

    /// Submit the staged batch as one indexed draw call.
    pub fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        self.backend.set_scissor(self.batch_scissor);
        self.update_transformation(self.batch_transform);
        self.backend.draw_indexed(self.batch.vertices(), self.batch.indices());
        self.batch.clear();
    }

    /// Rebind the GPU texture if `id` differs from the last bound id, or
    /// unconditionally when `force` is set (used when the binding may have
    /// been displaced, e.g. after a fresh atlas upload).
    pub fn change_texture(&mut self, id: TextureId, force: bool) {
        if force || self.bound_texture != Some(id) {
            self.backend.bind_texture(id);
            self.bound_texture = Some(id);
        }
    }

    /// Depth of the clip stack; zero between balanced frames.
    pub fn clipping_depth(&self) -> usize {
        self.clip.depth()
    }

    // Uploads the matrix that will transform each vertex of the next draw.
    fn update_transformation(&mut self, matrix: Mat4) {
        self.backend.set_transform(matrix.to_cols_array_2d());
    }

    // Flush if the staged geometry was batched under different state than
    // the upcoming primitive needs, then latch that state.
    fn require_batch_state(&mut self, texture: TextureId, force_bind: bool, states: &RenderStates) {
        let matrix = *self.projection.combine(&states.transform).matrix();
        let scissor = self.clip.current_scissor();
        if !self.batch.is_empty()
            && (self.batch_texture != texture
                || self.batch_scissor != scissor
                || self.batch_transform != matrix)
        {
            self.flush();
        }
        self.change_texture(texture, force_bind);
        self.batch_texture = texture;
        self.batch_scissor = scissor;
        self.batch_transform = matrix;
    }

    fn recompute_projection(&mut self) {
        let (win_w, win_h) = self.backend.surface_size();
        let (win_w, win_h) = (win_w as f32, win_h as f32);

        // NDC range covered by the viewport within the window.
        let ndc_x0 = 2.0 * self.viewport.x / win_w - 1.0;
        let ndc_x1 = 2.0 * (self.viewport.x + self.viewport.width) / win_w - 1.0;
        let ndc_y0 = 1.0 - 2.0 * self.viewport.y / win_h;
        let ndc_y1 = 1.0 - 2.0 * (self.viewport.y + self.viewport.height) / win_h;

        let sx = (ndc_x1 - ndc_x0) / self.view.width;
        let sy = (ndc_y1 - ndc_y0) / self.view.height;
        let tx = ndc_x0 - self.view.x * sx;
        let ty = ndc_y0 - self.view.y * sy;

        self.projection = Transform::from_matrix(
            Mat4::from_translation(glam::Vec3::new(tx, ty, 0.0))
                * Mat4::from_scale(glam::Vec3::new(sx, sy, 1.0)),
        );
    }

    // View-to-viewport mapping in device pixels, used for scissor math.
    fn map_to_device(&self, r: Rect) -> Rect {
        let sx = self.viewport.width / self.view.width;
        let sy = self.viewport.height / self.view.height;
        Rect::new(
            self.viewport.x + (r.x - self.view.x) * sx,
            self.viewport.y + (r.y - self.view.y) * sy,
            r.width * sx,
            r.height * sy,
        )
    }

    fn append_quad(&mut self, rect: Rect, uv: Rect, color: Color) {
        let vertices = [
            Vertex::new([rect.x, rect.y], [uv.x, uv.y], color),
            Vertex::new([rect.x + rect.width, rect.y], [uv.x + uv.width, uv.y], color),
            Vertex::new(
                [rect.x + rect.width, rect.y + rect.height],
                [uv.x + uv.width, uv.y + uv.height],
                color,
            ),
            Vertex::new([rect.x, rect.y + rect.height], [uv.x, uv.y + uv.height], color),
        ];
        self.batch.append(&vertices, &QUAD_INDICES);
    }

    // Triangle-fan circle approximation centered at (radius, radius).
    fn append_circle_fill(&mut self, radius: f32, segments: u32, color: Color) {
        let center = [radius, radius];
        let mut vertices = Vec::with_capacity(segments as usize + 1);
        vertices.push(Vertex::solid(center, color));
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            vertices.push(Vertex::solid(
                [radius + radius * angle.cos(), radius + radius * angle.sin()],
                color,
            ));
        }
        let mut indices = Vec::with_capacity(segments as usize * 3);
        for i in 0..segments {
            indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % segments]);
        }
        self.batch.append(&vertices, &indices);
    }

    // Ring between inner and outer radius around the same center.
    fn append_circle_ring(&mut self, radius: f32, inner: f32, outer: f32, segments: u32, color: Color) {
        let mut vertices = Vec::with_capacity(segments as usize * 2);
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            vertices.push(Vertex::solid([radius + inner * cos, radius + inner * sin], color));
            vertices.push(Vertex::solid([radius + outer * cos, radius + outer * sin], color));
        }
        let mut indices = Vec::with_capacity(segments as usize * 6);
        for i in 0..segments {
            let a = i * 2;
            let b = (i + 1) % segments * 2;
            indices.extend_from_slice(&[a, a + 1, b + 1, a, b + 1, b]);
        }
        self.batch.append(&vertices, &indices);
    }
}

fn circle_segment_count(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(24, 96)
}

impl<B: RenderBackend> DrawTarget for RenderTarget<B> {
    fn draw_widget(&mut self, states: &RenderStates, widget: &dyn Drawable) {
        if !widget.is_visible() {
            return;
        }
        widget.draw(self, states);
    }

    fn draw_sprite(&mut self, states: &RenderStates, sprite: &Sprite) {
        self.require_batch_state(sprite.texture().id(), false, states);
        let size = sprite.size();
        self.append_quad(
            Rect::new(0.0, 0.0, size.width, size.height),
            sprite.uv_rect(),
            sprite.color(),
        );
    }

    fn draw_text(&mut self, states: &RenderStates, text: &Text) {
        let quads = text.layout();
        if quads.is_empty() {
            return;
        }
        let (atlas_texture, refreshed) = text.font().ensure_uploaded(&mut self.backend);
        self.require_batch_state(atlas_texture, refreshed, states);

        // Outline first so the fill renders on top of it.
        let thickness = text.outline_thickness();
        if thickness > 0.0 && text.outline_color().a > 0.0 {
            let color = text.outline_color();
            for (dx, dy) in [(-thickness, 0.0), (thickness, 0.0), (0.0, -thickness), (0.0, thickness)] {
                for quad in &quads {
                    let rect = Rect::new(quad.rect.x + dx, quad.rect.y + dy, quad.rect.width, quad.rect.height);
                    self.append_quad(rect, quad.uv, color);
                }
            }
        }
        for quad in &quads {
            self.append_quad(quad.rect, quad.uv, text.fill_color());
        }
    }

    fn draw_circle(
        &mut self,
        states: &RenderStates,
        size: f32,
        background_color: Color,
        border_thickness: f32,
        border_color: Color,
    ) {
        let radius = size / 2.0;
        if radius <= 0.0 {
            return;
        }
        self.require_batch_state(self.white_texture, false, states);
        let segments = circle_segment_count(radius);
        if background_color.a > 0.0 {
            self.append_circle_fill(radius, segments, background_color);
        }
        if border_thickness != 0.0 {
            // Positive thickness grows outward from the circle's edge.
            let (inner, outer) = if border_thickness > 0.0 {
                (radius, radius + border_thickness)
            } else {
                ((radius + border_thickness).max(0.0), radius)
            };
            self.append_circle_ring(radius, inner, outer, segments, border_color);
        }
    }

    fn draw_triangles(&mut self, states: &RenderStates, vertices: &[Vertex], indices: Option<&[u32]>) {
        if vertices.is_empty() {
            return;
        }
        self.require_batch_state(self.white_texture, false, states);
        match indices {
            Some(indices) => self.batch.append(vertices, indices),
            None => self.batch.append_unindexed(vertices),
        }
    }

    fn add_clipping_layer(&mut self, states: &RenderStates, rect: Rect) {
        let device_rect = self.map_to_device(states.transform.transform_rect(rect));
        let window = self.backend.surface_size();
        self.clip.push(rect, device_rect, window);
    }

    fn remove_clipping_layer(&mut self) {
        self.clip.pop();
    }
}
