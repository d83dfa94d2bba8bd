//! Texture handles and the path-keyed texture cache

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use vitrine_core::{Result, VitrineError};

use crate::backend::{RenderBackend, TextureId};

/// A GPU texture handle plus its pixel dimensions.
///
/// Cheap to clone behind an `Arc`; widgets hold these, the backend owns the
/// actual GPU object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    id: TextureId,
    size: (u32, u32),
}

impl Texture {
    pub fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, size: (width, height) }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

/// Cache of textures keyed by the path they were decoded from.
///
/// `load` returns a shared handle; the same path is decoded and uploaded
/// once. Ownership is explicit: a cache entry keeps its texture alive until
/// [`release`](TextureCache::release) or [`prune`](TextureCache::prune)
/// drops it, at which point the GPU object is destroyed once no user still
/// holds the handle's id. There is no ambient global state.
#[derive(Default)]
pub struct TextureCache {
    entries: DashMap<PathBuf, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self { entries: DashMap::new() }
    }

    /// Load a texture from disk, or return the cached handle.
    pub fn load(
        &self,
        backend: &mut dyn RenderBackend,
        path: impl AsRef<Path>,
    ) -> Result<Arc<Texture>> {
        let path = path.as_ref();
        if let Some(entry) = self.entries.get(path) {
            return Ok(entry.value().clone());
        }

        let img = image::open(path)
            .map_err(|e| VitrineError::texture(format!("{}: {e}", path.display())))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let id = backend.create_texture(width, height, &img);
        debug!(path = %path.display(), width, height, "loaded texture");

        let texture = Arc::new(Texture::new(id, width, height));
        self.entries.insert(path.to_path_buf(), texture.clone());
        Ok(texture)
    }

    /// Drop the cache entry for `path` and destroy the GPU texture if no
    /// one else holds the handle.
    pub fn release(&self, backend: &mut dyn RenderBackend, path: impl AsRef<Path>) {
        if let Some((_, texture)) = self.entries.remove(path.as_ref()) {
            if Arc::strong_count(&texture) == 1 {
                backend.destroy_texture(texture.id());
            }
        }
    }

    /// Destroy every texture whose only remaining reference is the cache.
    pub fn prune(&self, backend: &mut dyn RenderBackend) {
        let stale: Vec<PathBuf> = self
            .entries
            .iter()
            .filter(|entry| Arc::strong_count(entry.value()) == 1)
            .map(|entry| entry.key().clone())
            .collect();
        for path in stale {
            if let Some((_, texture)) = self.entries.remove(&path) {
                backend.destroy_texture(texture.id());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendOp, RecordingBackend};

    #[test]
    fn prune_destroys_only_unreferenced_textures() {
        let mut backend = RecordingBackend::new(100, 100);
        let cache = TextureCache::new();

        let kept_id = backend.create_texture(1, 1, &[255; 4]);
        let dropped_id = backend.create_texture(1, 1, &[255; 4]);
        let kept = Arc::new(Texture::new(kept_id, 1, 1));
        cache.entries.insert(PathBuf::from("kept.png"), kept.clone());
        cache
            .entries
            .insert(PathBuf::from("dropped.png"), Arc::new(Texture::new(dropped_id, 1, 1)));

        cache.prune(&mut backend);

        assert_eq!(cache.len(), 1);
        assert!(backend
            .ops()
            .contains(&BackendOp::DestroyTexture { id: dropped_id }));
        assert!(!backend
            .ops()
            .contains(&BackendOp::DestroyTexture { id: kept_id }));
    }
}
