use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextureError {
    #[error("frame \"{name}\" has an invalid rectangle: {reason}")]
    InvalidFrameRect { name: String, reason: String },
    #[error("texture \"{texture}\" has no frame \"{frame}\"")]
    FrameNotFound { texture: String, frame: String },
    #[error("texture \"{texture}\" has no frame at index {index}")]
    FrameIndexOutOfRange { texture: String, index: usize },
    #[error("texture \"{texture}\" has no source {index}")]
    SourceNotFound { texture: String, index: usize },
    #[error("texture \"{0}\" was given no sources")]
    NoSources(String),
    #[error("texture key \"{0}\" is already in use")]
    TextureKeyInUse(String),
    #[error("texture \"{0}\" does not exist")]
    TextureNotFound(String),
}

impl TextureError {
    pub(crate) fn invalid_rect(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFrameRect {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}
