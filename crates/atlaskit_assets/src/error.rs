use atlaskit_textures::TextureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    /// The document as a whole can't be used, nothing was added.
    #[error("malformed atlas: {0}")]
    Malformed(String),
    /// A single entry can't be used, the rest of the atlas still loads.
    #[error("malformed atlas entry \"{name}\": {reason}")]
    MalformedEntry { name: String, reason: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Texture(#[from] TextureError),
}
