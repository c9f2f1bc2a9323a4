//! Loaders turning packer output into texture frames.

mod atlas;
mod error;
mod loader;
#[cfg(feature = "png")]
pub mod png;
mod sprite_sheet;

pub use atlas::{
    json, parse_atlas, parse_atlas_array, parse_atlas_hash, parse_atlas_str, AtlasData,
    AtlasFrames, AtlasReport,
};
pub use error::AtlasError;
pub use loader::TextureManagerExt;
pub use sprite_sheet::{parse_sprite_sheet, parse_sprite_sheet_from_frame, SpriteSheetConfig};
