//! Texture atlas frames for 2D renderers.
//!
//! Re-exports the workspace crates under one roof.

pub use atlaskit_assets as assets;
pub use atlaskit_collections as collections;
pub use atlaskit_geometry as geometry;
pub use atlaskit_textures as textures;
