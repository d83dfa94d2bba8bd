//! Core functionality for the Vitrine toolkit
//!
//! This crate provides the fundamental building blocks shared by the
//! renderer and the widget library: geometry and color types, the error
//! type, callback plumbing and logging setup.

pub mod error;
pub mod event;
pub mod logging;
pub mod types;

pub use error::{Result, VitrineError};
pub use event::{Callback, CallbackTrigger, WidgetId};
pub use types::{Color, Point, Rect, Size, Transform};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, VitrineError};
    pub use crate::event::{Callback, CallbackTrigger, WidgetId};
    pub use crate::types::{Color, Point, Rect, Size, Transform};
}

/// Toolkit version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
