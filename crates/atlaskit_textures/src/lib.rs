//! Texture sources, frames and the registries holding them.
//!
//! A frame maps a logical sprite onto the packed pixels of a shared atlas
//! image: trim offsets, 90 degree rotation and runtime crops are resolved here
//! into a cut rectangle and UVs which a renderer can draw without further math.

mod config;
mod crop;
mod error;
mod frame;
mod manager;
mod meta;
mod source;
mod texture;
mod uv;

pub use config::{ScaleMode, TexturesConfig};
pub use crop::Crop;
pub use error::TextureError;
pub use frame::{DrawGeometry, Frame, Scale9, Trim};
pub use manager::TextureManager;
pub use meta::AtlasMeta;
pub use source::TextureSource;
pub use texture::{Texture, BASE_FRAME};
pub use uv::UvQuad;
