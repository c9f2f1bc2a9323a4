use std::collections::HashMap;

use crate::{Frame, Texture, TextureError, TextureSource, TexturesConfig};

/// Registry of textures by key.
#[derive(Debug, Default)]
pub struct TextureManager {
    config: TexturesConfig,
    textures: HashMap<String, Texture>,
}

impl TextureManager {
    pub fn new(config: TexturesConfig) -> Self {
        Self {
            config,
            textures: HashMap::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &TexturesConfig {
        &self.config
    }

    /// Builds a texture under a free key without registering it yet.
    /// Sources pick up the configured scale mode.
    pub fn new_texture(
        &self,
        key: impl Into<String>,
        sources: impl IntoIterator<Item = TextureSource>,
    ) -> Result<Texture, TextureError> {
        let key = key.into();
        if self.exists(&key) {
            return Err(TextureError::TextureKeyInUse(key));
        }

        let scale_mode = self.config.scale_mode();
        let sources = sources.into_iter().map(|mut source| {
            source.set_filter(scale_mode);
            source
        });

        Texture::new(key, sources)
    }

    pub fn insert(&mut self, texture: Texture) -> Result<&mut Texture, TextureError> {
        let key = texture.key().to_owned();
        if self.exists(&key) {
            return Err(TextureError::TextureKeyInUse(key));
        }

        log::debug!(
            "Adding texture \"{key}\" with {} frames",
            texture.frame_total()
        );

        Ok(self.textures.entry(key).or_insert(texture))
    }

    /// Creates and registers a texture holding only its `__BASE` frame.
    pub fn create(
        &mut self,
        key: impl Into<String>,
        sources: impl IntoIterator<Item = TextureSource>,
    ) -> Result<&mut Texture, TextureError> {
        let texture = self.new_texture(key, sources)?;
        self.insert(texture)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&Texture, TextureError> {
        self.textures
            .get(key)
            .ok_or_else(|| TextureError::TextureNotFound(key.to_owned()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Texture, TextureError> {
        self.textures
            .get_mut(key)
            .ok_or_else(|| TextureError::TextureNotFound(key.to_owned()))
    }

    /// Drops a texture together with its sources and frames.
    pub fn remove(&mut self, key: &str) -> Option<Texture> {
        self.textures.remove(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.textures.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn frame(&self, key: &str, name: &str) -> Result<&Frame, TextureError> {
        self.get(key)?.frame(name)
    }

    /// Like `frame`, but falls back to `__BASE` on a missing frame when
    /// `base_frame_fallback` is enabled. A missing texture is still an error.
    pub fn frame_or_base(&self, key: &str, name: &str) -> Result<&Frame, TextureError> {
        let texture = self.get(key)?;
        match texture.frame(name) {
            Err(TextureError::FrameNotFound { .. }) if self.config.base_frame_fallback => {
                log::warn!("Texture \"{key}\" has no frame \"{name}\", drawing __BASE instead");
                Ok(texture.base_frame())
            }
            result => result,
        }
    }

    pub fn clone_frame(&self, key: &str, name: &str) -> Result<Frame, TextureError> {
        self.frame(key, name).cloned()
    }

    pub fn pixel(
        &self,
        key: &str,
        name: &str,
        x: f32,
        y: f32,
    ) -> Result<Option<[u8; 4]>, TextureError> {
        self.get(key)?.pixel(name, x, y)
    }

    pub fn pixel_alpha(
        &self,
        key: &str,
        name: &str,
        x: f32,
        y: f32,
    ) -> Result<Option<u8>, TextureError> {
        self.get(key)?.pixel_alpha(name, x, y)
    }
}
