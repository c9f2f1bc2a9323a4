use serde::Deserialize;
use smart_default::SmartDefault;
use strum::{Display, EnumString};

/// Texture sampling used when a source is drawn scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Linear,
    Nearest,
}

/// Settings shared by every texture created through a `TextureManager`.
#[derive(Debug, Clone, SmartDefault, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TexturesConfig {
    /// Pixel art games turn this off to get nearest neighbour sampling on every new source.
    #[default(true)]
    pub antialias: bool,
    /// When a frame lookup misses, hand out the texture's `__BASE` frame instead of failing.
    #[default(true)]
    pub base_frame_fallback: bool,
}

impl TexturesConfig {
    pub fn scale_mode(&self) -> ScaleMode {
        if self.antialias {
            ScaleMode::Linear
        } else {
            ScaleMode::Nearest
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = TexturesConfig::default();

        assert!(config.antialias);
        assert!(config.base_frame_fallback);
        assert_eq!(config.scale_mode(), ScaleMode::Linear);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TexturesConfig = serde_json::from_str(r#"{ "antialias": false }"#).unwrap();

        assert!(!config.antialias);
        assert!(config.base_frame_fallback);
        assert_eq!(config.scale_mode(), ScaleMode::Nearest);
    }

    #[test]
    fn test_scale_mode_names() {
        assert_eq!(ScaleMode::Nearest.to_string(), "nearest");
        assert_eq!(ScaleMode::from_str("linear").unwrap(), ScaleMode::Linear);
    }
}
