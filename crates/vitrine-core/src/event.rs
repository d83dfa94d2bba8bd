//! Widget callback types
//!
//! Widgets record state changes as [`Callback`] values; the owning
//! container drains them each frame and hands them to the application.

use serde::{Deserialize, Serialize};

/// Unique widget identifier
pub type WidgetId = u64;

/// Generate a unique widget ID
pub fn generate_id() -> WidgetId {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// What caused a callback to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallbackTrigger {
    Clicked,
    Checked,
    Unchecked,
    ValueChanged,
}

/// A state-change notification emitted by a widget
#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    /// The widget that emitted the callback
    pub widget_id: WidgetId,
    pub trigger: CallbackTrigger,
    /// Trigger-specific payload (e.g. the new value of a loading bar)
    pub value: u32,
}

impl Callback {
    pub fn new(widget_id: WidgetId, trigger: CallbackTrigger) -> Self {
        Self { widget_id, trigger, value: 0 }
    }

    pub fn with_value(widget_id: WidgetId, trigger: CallbackTrigger, value: u32) -> Self {
        Self { widget_id, trigger, value }
    }
}
