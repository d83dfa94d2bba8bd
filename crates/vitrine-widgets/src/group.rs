//! Group: the widget container
//!
//! Widgets are stored in an arena and referenced by key; draw order is a
//! separate back-to-front list, so z-order changes never move widgets in
//! memory. Lookup by name matches the first widget added under that name.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use vitrine_core::event::Callback;
use vitrine_core::types::{Point, Size};
use vitrine_core::Result;
use vitrine_renderer::{DrawTarget, Drawable, RenderStates};

use crate::widget::{save_state, Widget, WidgetBase};

new_key_type! {
    /// Stable handle to a widget inside a [`Group`].
    pub struct WidgetKey;
}

struct Entry {
    name: String,
    widget: Box<dyn Widget>,
}

/// Container that owns widgets and draws them in z-order.
///
/// A group is itself a widget, so containers nest; child positions are
/// relative to the group's own position.
#[derive(Default)]
pub struct Group {
    base: WidgetBase,
    size: Size,
    widgets: SlotMap<WidgetKey, Entry>,
    /// Draw order, back to front.
    order: Vec<WidgetKey>,
    focused: Option<WidgetKey>,
    callbacks: VecDeque<Callback>,
}

#[derive(Serialize, Deserialize)]
struct GroupState {
    position: Point,
    size: Size,
    visible: bool,
    children: Vec<String>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, position: Point) {
        self.base.set_position(position);
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Add a widget under a name and return its key.
    pub fn add(&mut self, widget: impl Widget + 'static, name: impl Into<String>) -> WidgetKey {
        let key = self.widgets.insert(Entry {
            name: name.into(),
            widget: Box::new(widget),
        });
        self.order.push(key);
        key
    }

    /// First widget added under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Widget> {
        self.key_of(name).map(|key| &*self.widgets[key].widget)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Widget + 'static)> {
        let key = self.key_of(name)?;
        Some(&mut *self.widgets[key].widget)
    }

    /// Typed lookup by name. Returns `None` when the name is unknown or
    /// names a widget of a different type.
    pub fn get_as<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get(name)?.as_any().downcast_ref()
    }

    pub fn get_mut_as<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)?.as_any_mut().downcast_mut()
    }

    /// Key of the first widget added under `name`.
    pub fn key_of(&self, name: &str) -> Option<WidgetKey> {
        self.order
            .iter()
            .copied()
            .find(|&key| self.widgets[key].name == name)
    }

    pub fn widget(&self, key: WidgetKey) -> Option<&dyn Widget> {
        self.widgets.get(key).map(|entry| &*entry.widget)
    }

    pub fn widget_mut(&mut self, key: WidgetKey) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.get_mut(key).map(|entry| &mut *entry.widget)
    }

    /// Remove the first widget added under `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.key_of(name) {
            Some(key) => {
                self.remove_key(key);
                true
            }
            None => false,
        }
    }

    pub fn remove_key(&mut self, key: WidgetKey) {
        if self.widgets.remove(key).is_some() {
            self.order.retain(|&k| k != key);
            if self.focused == Some(key) {
                self.focused = None;
            }
        }
    }

    pub fn remove_all(&mut self) {
        self.widgets.clear();
        self.order.clear();
        self.focused = None;
    }

    pub fn focus(&mut self, key: WidgetKey) {
        if self.widgets.contains_key(key) {
            self.focused = Some(key);
        }
    }

    pub fn unfocus(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<WidgetKey> {
        self.focused
    }

    /// Draw the widget last (on top of everything else).
    pub fn move_to_front(&mut self, key: WidgetKey) {
        if self.widgets.contains_key(key) {
            self.order.retain(|&k| k != key);
            self.order.push(key);
        }
    }

    /// Draw the widget first (behind everything else).
    pub fn move_to_back(&mut self, key: WidgetKey) {
        if self.widgets.contains_key(key) {
            self.order.retain(|&k| k != key);
            self.order.insert(0, key);
        }
    }

    /// Topmost visible widget under a point given in the group's parent
    /// coordinates.
    pub fn widget_at(&self, point: Point) -> Option<WidgetKey> {
        let local = point - self.base.position();
        self.order.iter().rev().copied().find(|&key| {
            let widget = &self.widgets[key].widget;
            widget.is_visible() && widget.hit_test(local)
        })
    }

    /// Next pending callback from any owned widget (nested groups
    /// included), oldest first per widget.
    pub fn poll_callback(&mut self) -> Option<Callback> {
        if self.callbacks.is_empty() {
            let mut collected = Vec::new();
            self.collect_callbacks(&mut collected);
            self.callbacks.extend(collected);
        }
        self.callbacks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widget names in draw order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&key| self.widgets[key].name.as_str())
    }
}

impl Drawable for Group {
    fn is_visible(&self) -> bool {
        self.base.visible()
    }

    fn draw(&self, target: &mut dyn DrawTarget, states: &RenderStates) {
        let pos = self.base.position();
        let states = states.translated(pos.x, pos.y);
        for &key in &self.order {
            let widget = &self.widgets[key].widget;
            if widget.is_visible() {
                widget.draw(target, &states);
            }
        }
    }
}

impl Widget for Group {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size(&self) -> Size {
        self.size
    }

    fn type_name(&self) -> &'static str {
        "Group"
    }

    fn save(&self) -> Result<String> {
        save_state(&GroupState {
            position: self.base.position(),
            size: self.size,
            visible: self.base.visible(),
            children: self.names().map(str::to_owned).collect(),
        })
    }

    fn collect_callbacks(&mut self, out: &mut Vec<Callback>) {
        out.extend(self.base.take_callbacks());
        for &key in &self.order {
            if let Some(entry) = self.widgets.get_mut(key) {
                entry.widget.collect_callbacks(out);
            }
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
