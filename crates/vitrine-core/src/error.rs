//! Error types for the Vitrine toolkit

use thiserror::Error;

/// Main error type for Vitrine operations
#[derive(Debug, Error)]
pub enum VitrineError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Renderer error: {0}")]
    Renderer(String),

    #[error("Widget error: {0}")]
    Widget(String),

    #[error("Texture error: {0}")]
    Texture(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VitrineError {
    /// Create a backend error from a string
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a renderer error from a string
    pub fn renderer<S: Into<String>>(msg: S) -> Self {
        Self::Renderer(msg.into())
    }

    /// Create a widget error from a string
    pub fn widget<S: Into<String>>(msg: S) -> Self {
        Self::Widget(msg.into())
    }

    /// Create a texture error from a string
    pub fn texture<S: Into<String>>(msg: S) -> Self {
        Self::Texture(msg.into())
    }

    /// Create a font error from a string
    pub fn font<S: Into<String>>(msg: S) -> Self {
        Self::Font(msg.into())
    }

    /// Create a configuration error from a string
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for Vitrine operations
pub type Result<T> = std::result::Result<T, VitrineError>;
