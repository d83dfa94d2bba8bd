//! Base widget capability trait and shared widget state
//!
//! Widgets are flat compositions: a [`WidgetBase`] carrying the fields
//! every widget has, plus per-widget behavior exposed through the
//! [`Widget`] trait (draw via its [`Drawable`] supertrait, measure, hit
//! test, serialize). There is no inheritance hierarchy.

use std::any::Any;

use serde::Serialize;
use vitrine_core::event::{generate_id, Callback, CallbackTrigger, WidgetId};
use vitrine_core::types::{Point, Rect, Size};
use vitrine_core::{Result, VitrineError};
use vitrine_renderer::Drawable;

/// Capabilities every widget provides on top of being drawable.
pub trait Widget: Drawable {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// The widget's current size in gui-logical units.
    fn size(&self) -> Size;

    /// Stable name of the widget kind, used in serialized state.
    fn type_name(&self) -> &'static str;

    /// Serialize the widget's state.
    fn save(&self) -> Result<String>;

    /// Whether a gui-global point falls on the widget.
    fn hit_test(&self, point: Point) -> bool {
        Rect::from_pos_size(self.base().position(), self.size()).contains(point)
    }

    /// Drain queued callbacks into `out`. Containers override this to
    /// recurse into their children.
    fn collect_callbacks(&mut self, out: &mut Vec<Callback>) {
        out.extend(self.base_mut().take_callbacks());
    }

    /// Access to the concrete widget type for downcasting.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// State common to all widgets, composed into each widget struct.
#[derive(Debug)]
pub struct WidgetBase {
    id: WidgetId,
    position: Point,
    visible: bool,
    enabled: bool,
    pending: Vec<Callback>,
}

impl WidgetBase {
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            position: Point::zero(),
            visible: true,
            enabled: true,
            pending: Vec::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Queue a callback for the owning container to collect.
    pub fn push_callback(&mut self, trigger: CallbackTrigger) {
        self.pending.push(Callback::new(self.id, trigger));
    }

    /// Queue a callback carrying a value.
    pub fn push_callback_value(&mut self, trigger: CallbackTrigger, value: u32) {
        self.pending.push(Callback::with_value(self.id, trigger, value));
    }

    /// Take all queued callbacks, oldest first.
    pub fn take_callbacks(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a widget state struct as RON.
pub(crate) fn save_state<T: Serialize>(state: &T) -> Result<String> {
    ron::to_string(state).map_err(|e| VitrineError::widget(format!("failed to serialize: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_drain_in_order() {
        let mut base = WidgetBase::new();
        base.push_callback(CallbackTrigger::Checked);
        base.push_callback_value(CallbackTrigger::ValueChanged, 7);

        let drained = base.take_callbacks();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].trigger, CallbackTrigger::Checked);
        assert_eq!(drained[1].value, 7);
        assert!(base.take_callbacks().is_empty());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(WidgetBase::new().id(), WidgetBase::new().id());
    }
}
