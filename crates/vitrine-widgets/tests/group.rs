//! Group container behavior: naming, z-order, callback polling and
//! drawing the owned widgets through a render target.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use vitrine_core::event::CallbackTrigger;
use vitrine_core::types::{Point, Rect, Size};
use vitrine_renderer::backend::RecordingBackend;
use vitrine_renderer::{RenderTarget, Texture, TextureId};
use vitrine_widgets::{Checkbox, Group, LoadingBar, Picture, Widget};

fn texture(id: u32, w: u32, h: u32) -> Arc<Texture> {
    Arc::new(Texture::new(TextureId(id), w, h))
}

fn checkbox() -> Checkbox {
    Checkbox::new(texture(1, 32, 32), texture(2, 32, 32))
}

#[test]
fn widgets_are_found_by_name() {
    let mut group = Group::new();
    group.add(checkbox(), "accept");
    group.add(LoadingBar::new(texture(3, 100, 10), texture(4, 100, 10)), "progress");

    assert!(group.get("accept").is_some());
    assert_eq!(group.get("accept").unwrap().type_name(), "Checkbox");
    assert!(group.get("missing").is_none());
    assert_eq!(group.len(), 2);
}

#[test]
fn remove_drops_only_the_named_widget() {
    let mut group = Group::new();
    group.add(checkbox(), "a");
    group.add(checkbox(), "b");

    assert!(group.remove("a"));
    assert!(!group.remove("a"));
    assert!(group.get("b").is_some());
    assert_eq!(group.len(), 1);
}

#[test]
fn z_order_follows_move_operations() {
    let mut group = Group::new();
    let a = group.add(checkbox(), "a");
    let b = group.add(checkbox(), "b");
    group.add(checkbox(), "c");

    group.move_to_front(a);
    group.move_to_back(b);

    let names: Vec<_> = group.names().collect();
    assert_eq!(names, vec!["b", "c", "a"]);
}

#[test]
fn focus_clears_when_widget_is_removed() {
    let mut group = Group::new();
    let key = group.add(checkbox(), "a");
    group.focus(key);
    assert_eq!(group.focused(), Some(key));

    group.remove_key(key);
    assert_eq!(group.focused(), None);
}

#[test]
fn poll_callback_drains_widget_queues_in_order() {
    let mut group = Group::new();
    group.add(checkbox(), "cb");
    let mut bar = LoadingBar::new(texture(3, 100, 10), texture(4, 100, 10));
    bar.set_maximum(10);
    group.add(bar, "bar");

    if let Some(cb) = group.get_mut("cb") {
        cb.base_mut().push_callback(CallbackTrigger::Checked);
    }
    if let Some(bar) = group.get_mut("bar") {
        bar.base_mut()
            .push_callback_value(CallbackTrigger::ValueChanged, 3);
    }

    let first = group.poll_callback().unwrap();
    let second = group.poll_callback().unwrap();
    assert_eq!(first.trigger, CallbackTrigger::Checked);
    assert_eq!(second.trigger, CallbackTrigger::ValueChanged);
    assert_eq!(second.value, 3);
    assert!(group.poll_callback().is_none());
}

#[test]
fn nested_group_callbacks_reach_the_root() {
    let mut inner = Group::new();
    inner.add(checkbox(), "cb");
    let mut root = Group::new();
    root.add(inner, "panel");

    root.get_mut_as::<Group>("panel")
        .unwrap()
        .get_mut_as::<Checkbox>("cb")
        .unwrap()
        .check();

    let callback = root.poll_callback().unwrap();
    assert_eq!(callback.trigger, CallbackTrigger::Checked);
    assert!(root.poll_callback().is_none());
}

#[test]
fn typed_lookup_rejects_wrong_type() {
    let mut group = Group::new();
    group.add(checkbox(), "cb");
    assert!(group.get_as::<Checkbox>("cb").is_some());
    assert!(group.get_as::<LoadingBar>("cb").is_none());
}

#[test]
fn widget_at_returns_topmost_hit() {
    let mut group = Group::new();
    let mut below = Picture::new(texture(1, 50, 50));
    below.set_position(Point::new(0.0, 0.0));
    let mut above = Picture::new(texture(2, 50, 50));
    above.set_position(Point::new(25.0, 25.0));

    let below_key = group.add(below, "below");
    let above_key = group.add(above, "above");

    assert_eq!(group.widget_at(Point::new(30.0, 30.0)), Some(above_key));
    assert_eq!(group.widget_at(Point::new(5.0, 5.0)), Some(below_key));
    assert_eq!(group.widget_at(Point::new(200.0, 200.0)), None);
}

#[test]
fn hidden_widgets_are_not_hit_or_drawn() {
    let mut group = Group::new();
    let mut picture = Picture::new(texture(1, 50, 50));
    picture.base_mut().set_visible(false);
    group.add(picture, "hidden");

    assert_eq!(group.widget_at(Point::new(10.0, 10.0)), None);

    let mut target = RenderTarget::new(RecordingBackend::new(800, 600));
    target.set_view(Rect::new(0.0, 0.0, 800.0, 600.0), Rect::new(0.0, 0.0, 800.0, 600.0));
    target.draw_gui(&group).unwrap();
    assert_eq!(target.backend().draw_count(), 0);
}

#[test]
fn drawing_a_group_batches_widgets_by_texture() {
    let mut group = Group::new();
    let shared = texture(1, 16, 16);
    let mut a = Picture::new(shared.clone());
    a.set_position(Point::new(0.0, 0.0));
    let mut b = Picture::new(shared);
    b.set_position(Point::new(100.0, 0.0));
    group.add(a, "a");
    group.add(b, "b");

    let mut target = RenderTarget::new(RecordingBackend::new(800, 600));
    target.set_view(Rect::new(0.0, 0.0, 800.0, 600.0), Rect::new(0.0, 0.0, 800.0, 600.0));
    target.draw_gui(&group).unwrap();

    // Same texture but different widget transforms: one flush per widget.
    assert_eq!(target.backend().draw_count(), 2);
}

#[test]
fn saved_state_round_trips_through_ron() {
    let mut bar = LoadingBar::new(texture(3, 100, 10), texture(4, 100, 10));
    bar.set_position(Point::new(5.0, 6.0));
    bar.set_value(42);

    let saved = bar.save().unwrap();
    let parsed: ron::Value = ron::from_str(&saved).unwrap();
    let _ = parsed; // parse success is the contract; shape is widget-private
    assert!(saved.contains("42"));
}

#[test]
fn checkbox_size_drives_hit_test() {
    let mut cb = checkbox();
    cb.set_position(Point::new(10.0, 10.0));
    cb.set_size(Size::new(20.0, 20.0));

    assert!(cb.hit_test(Point::new(15.0, 15.0)));
    assert!(!cb.hit_test(Point::new(31.0, 15.0)));
}
