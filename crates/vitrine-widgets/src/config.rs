//! Widget appearance configuration
//!
//! Widgets that render from textures load their image paths and colors
//! from RON config files, one section struct per widget kind. Image paths
//! are resolved relative to the config file's directory.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vitrine_core::types::Color;
use vitrine_core::{Result, VitrineError};

/// Checkbox appearance: per-state images plus the label color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckboxConfig {
    pub unchecked_image: PathBuf,
    pub checked_image: PathBuf,
    #[serde(default)]
    pub hover_image: Option<PathBuf>,
    #[serde(default)]
    pub focused_image: Option<PathBuf>,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
}

/// Loading bar skin: a plain back/front pair, or split into
/// left/middle/right thirds that stretch independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoadingBarSkin {
    Simple {
        back: PathBuf,
        front: PathBuf,
    },
    Split {
        back: [PathBuf; 3],
        front: [PathBuf; 3],
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingBarConfig {
    pub skin: LoadingBarSkin,
}

/// Bitmap button appearance: the button face plus the caption color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitmapButtonConfig {
    pub background_image: PathBuf,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
}

fn default_text_color() -> Color {
    Color::BLACK
}

/// Parse a widget config from a RON string.
pub fn parse_config<T: DeserializeOwned>(text: &str) -> Result<T> {
    ron::from_str(text).map_err(|e| VitrineError::config(e.to_string()))
}

/// Load a widget config file.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading widget config");
    let text = std::fs::read_to_string(path)
        .map_err(|e| VitrineError::config(format!("{}: {e}", path.display())))?;
    parse_config(&text).map_err(|e| VitrineError::config(format!("{}: {e}", path.display())))
}

/// Resolve an image path relative to the config file that referenced it.
pub fn resolve_path(config_path: &Path, image: &Path) -> PathBuf {
    if image.is_absolute() {
        image.to_path_buf()
    } else {
        config_path.parent().unwrap_or(Path::new(".")).join(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn checkbox_config_parses_with_optional_fields_absent() {
        let config: CheckboxConfig = parse_config(
            r#"(
                unchecked_image: "unchecked.png",
                checked_image: "checked.png",
            )"#,
        )
        .unwrap();
        assert_eq!(config.unchecked_image, PathBuf::from("unchecked.png"));
        assert!(config.hover_image.is_none());
        assert_eq!(config.text_color, Color::BLACK);
    }

    #[test]
    fn loading_bar_config_parses_split_skin() {
        let config: LoadingBarConfig = parse_config(
            r#"(
                skin: Split(
                    back: ["l_back.png", "m_back.png", "r_back.png"],
                    front: ["l_front.png", "m_front.png", "r_front.png"],
                ),
            )"#,
        )
        .unwrap();
        match config.skin {
            LoadingBarSkin::Split { back, .. } => {
                assert_eq!(back[1], PathBuf::from("m_back.png"));
            }
            _ => panic!("expected split skin"),
        }
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = parse_config::<CheckboxConfig>("(not valid").unwrap_err();
        assert!(matches!(err, VitrineError::Config(_)));
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let resolved = resolve_path(Path::new("themes/dark/checkbox.ron"), Path::new("box.png"));
        assert_eq!(resolved, PathBuf::from("themes/dark/box.png"));
    }
}
