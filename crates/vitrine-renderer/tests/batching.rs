//! End-to-end behavior of the render target over a recording backend:
//! batching boundaries, texture-bind deduplication, clip nesting and the
//! view-to-viewport mapping.

use std::sync::Arc;

use glam::{Mat4, Vec4};
use pretty_assertions::assert_eq;
use vitrine_core::types::{Color, Rect, Size};
use vitrine_renderer::backend::{BackendOp, RecordingBackend};
use vitrine_renderer::{
    DrawTarget, RenderBackend, RenderStates, RenderTarget, Sprite, Texture, Vertex,
};

fn target(width: u32, height: u32) -> RenderTarget<RecordingBackend> {
    let mut target = RenderTarget::new(RecordingBackend::new(width, height));
    target.set_view(
        Rect::new(0.0, 0.0, width as f32, height as f32),
        Rect::new(0.0, 0.0, width as f32, height as f32),
    );
    target
}

fn sprite(target: &mut RenderTarget<RecordingBackend>, w: u32, h: u32) -> Sprite {
    let id = target
        .backend_mut()
        .create_texture(w, h, &vec![255u8; (w * h * 4) as usize]);
    Sprite::new(Arc::new(Texture::new(id, w, h)))
}

#[test]
fn same_texture_sprites_batch_into_one_flush() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.draw_sprite(&states, &sprite);
    target.draw_sprite(&states, &sprite);
    target.flush();

    let draws = target.backend().draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].vertices.len(), 8);
    assert_eq!(draws[0].indices.len(), 12);
}

#[test]
fn different_textures_force_two_flushes() {
    let mut target = target(800, 600);
    let a = sprite(&mut target, 4, 4);
    let b = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.draw_sprite(&states, &a);
    target.draw_sprite(&states, &b);
    target.flush();

    let draws = target.backend().draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].texture, Some(a.texture().id()));
    assert_eq!(draws[1].texture, Some(b.texture().id()));
}

#[test]
fn transform_change_forces_flush() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);

    target.draw_sprite(&RenderStates::new(), &sprite);
    target.draw_sprite(&RenderStates::new().translated(10.0, 0.0), &sprite);
    target.flush();

    assert_eq!(target.backend().draw_count(), 2);
}

#[test]
fn change_texture_skips_redundant_binds() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let id = sprite.texture().id();

    target.backend_mut().clear_log();
    target.change_texture(id, false);
    target.change_texture(id, false);
    assert_eq!(target.backend().bind_count(), 1);

    target.change_texture(id, true);
    target.change_texture(id, true);
    assert_eq!(target.backend().bind_count(), 3);
}

#[test]
fn repeated_same_texture_draws_bind_once() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.backend_mut().clear_log();
    for _ in 0..5 {
        target.draw_sprite(&states, &sprite);
    }
    target.flush();

    assert_eq!(target.backend().bind_count(), 1);
}

#[test]
fn clip_layer_splits_batches_and_restores() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.draw_sprite(&states, &sprite);
    target.add_clipping_layer(&states, Rect::new(100.0, 100.0, 50.0, 50.0));
    target.draw_sprite(&states, &sprite);
    target.remove_clipping_layer();
    target.draw_sprite(&states, &sprite);
    target.flush();

    let draws = target.backend().draws();
    assert_eq!(draws.len(), 3);
    assert_eq!(draws[0].scissor, None);
    assert_eq!(draws[1].scissor, Some([100, 100, 50, 50]));
    assert_eq!(draws[2].scissor, None);
}

#[test]
fn nested_clip_is_intersection_of_all_layers() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.add_clipping_layer(&states, Rect::new(0.0, 0.0, 200.0, 200.0));
    target.add_clipping_layer(&states, Rect::new(100.0, 100.0, 200.0, 200.0));
    target.draw_sprite(&states, &sprite);
    target.flush();
    target.remove_clipping_layer();
    target.remove_clipping_layer();

    assert_eq!(target.backend().draws()[0].scissor, Some([100, 100, 100, 100]));
    assert_eq!(target.clipping_depth(), 0);
}

#[test]
fn contained_clip_degenerates_to_inner_rect() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.add_clipping_layer(&states, Rect::new(0.0, 0.0, 400.0, 400.0));
    target.add_clipping_layer(&states, Rect::new(50.0, 60.0, 70.0, 80.0));
    target.draw_sprite(&states, &sprite);
    target.flush();
    target.remove_clipping_layer();
    target.remove_clipping_layer();

    assert_eq!(target.backend().draws()[0].scissor, Some([50, 60, 70, 80]));
}

#[test]
fn disjoint_clip_yields_zero_area_scissor() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new();

    target.add_clipping_layer(&states, Rect::new(0.0, 0.0, 100.0, 100.0));
    target.add_clipping_layer(&states, Rect::new(300.0, 300.0, 100.0, 100.0));
    target.draw_sprite(&states, &sprite);
    target.flush();
    target.remove_clipping_layer();
    target.remove_clipping_layer();

    let scissor = target.backend().draws()[0].scissor.unwrap();
    assert_eq!((scissor[2], scissor[3]), (0, 0));
}

#[test]
fn clip_rect_follows_render_state_transform() {
    let mut target = target(800, 600);
    let sprite = sprite(&mut target, 4, 4);
    let states = RenderStates::new().translated(100.0, 50.0);

    target.add_clipping_layer(&states, Rect::new(0.0, 0.0, 40.0, 40.0));
    target.draw_sprite(&states, &sprite);
    target.flush();
    target.remove_clipping_layer();

    assert_eq!(target.backend().draws()[0].scissor, Some([100, 50, 40, 40]));
}

#[test]
fn unindexed_triangles_get_linear_indices() {
    let mut target = target(800, 600);
    let states = RenderStates::new();
    let vertices: Vec<Vertex> = (0..6)
        .map(|i| Vertex::solid([i as f32, 0.0], Color::RED))
        .collect();

    target.draw_triangles(&states, &vertices, None);
    target.flush();

    assert_eq!(target.backend().draws()[0].indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn indexed_triangles_pass_through_with_offset() {
    let mut target = target(800, 600);
    let states = RenderStates::new();
    let tri: Vec<Vertex> = (0..3)
        .map(|i| Vertex::solid([i as f32, 0.0], Color::RED))
        .collect();

    target.draw_triangles(&states, &tri, Some(&[0, 1, 2]));
    target.draw_triangles(&states, &tri, Some(&[2, 1, 0]));
    target.flush();

    assert_eq!(target.backend().draw_count(), 1);
    assert_eq!(target.backend().draws()[0].indices, vec![0, 1, 2, 5, 4, 3]);
}

#[test]
fn circle_geometry_is_untextured_and_fanned() {
    let mut target = target(800, 600);
    let states = RenderStates::new();

    target.draw_circle(&states, 50.0, Color::BLUE, 0.0, Color::TRANSPARENT);
    target.flush();

    let draws = target.backend().draws();
    assert_eq!(draws.len(), 1);
    // One center vertex plus the perimeter; every index triple fans from 0.
    let draw = &draws[0];
    assert!(draw.vertices.len() > 24);
    assert!(draw.indices.chunks(3).all(|tri| tri[0] == 0));
}

#[test]
fn circle_border_adds_ring_in_same_batch() {
    let mut target = target(800, 600);
    let states = RenderStates::new();

    target.draw_circle(&states, 50.0, Color::BLUE, 3.0, Color::RED);
    target.flush();

    // Fill and border share the white texture, so still one draw call.
    assert_eq!(target.backend().draw_count(), 1);
}

/// Half-scale mapping: view (0,0,800,600) onto viewport (0,0,400,300)
/// places logical (800,600) at device (400,300).
#[test]
fn view_mapping_scales_to_viewport() {
    let mut target = RenderTarget::new(RecordingBackend::new(400, 300));
    target.set_view(Rect::new(0.0, 0.0, 800.0, 600.0), Rect::new(0.0, 0.0, 400.0, 300.0));

    let mut marker = sprite(&mut target, 1, 1);
    marker.set_size(Size::new(0.0, 0.0));
    target.draw_sprite(&RenderStates::new().translated(800.0, 600.0), &marker);
    target.flush();

    let draw = &target.backend().draws()[0];
    let matrix = Mat4::from_cols_array_2d(&draw.transform);
    let position = draw.vertices[0].position;
    let ndc = matrix * Vec4::new(position[0], position[1], 0.0, 1.0);

    let device_x = (ndc.x + 1.0) / 2.0 * 400.0;
    let device_y = (1.0 - ndc.y) / 2.0 * 300.0;
    assert!((device_x - 400.0).abs() < 1e-3, "device_x = {device_x}");
    assert!((device_y - 300.0).abs() < 1e-3, "device_y = {device_y}");
}

#[test]
fn draw_gui_flushes_and_frames() {
    struct Quad(Sprite);
    impl vitrine_renderer::Drawable for Quad {
        fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
            target.draw_sprite(states, &self.0);
        }
    }

    let mut target = target(800, 600);
    let quad = Quad(sprite(&mut target, 4, 4));
    target.draw_gui(&quad).unwrap();

    let ops = target.backend().ops();
    assert!(matches!(ops.first(), Some(BackendOp::CreateTexture { .. })));
    assert!(ops.contains(&BackendOp::BeginFrame));
    assert_eq!(target.backend().draw_count(), 1);
    assert!(matches!(ops.last(), Some(BackendOp::EndFrame)));
}

#[test]
fn invisible_widgets_are_skipped() {
    struct Hidden;
    impl vitrine_renderer::Drawable for Hidden {
        fn is_visible(&self) -> bool {
            false
        }
        fn draw(&self, _target: &mut dyn DrawTarget, _states: &RenderStates) {
            panic!("invisible widget must not be drawn");
        }
    }

    let mut target = target(800, 600);
    target.draw_gui(&Hidden).unwrap();
    assert_eq!(target.backend().draw_count(), 0);
}
