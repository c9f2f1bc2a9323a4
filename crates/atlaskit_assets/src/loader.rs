use atlaskit_textures::{Texture, TextureManager, TextureSource};
use serde_json::Value;

use crate::{
    parse_atlas, parse_atlas_array, parse_atlas_hash, parse_sprite_sheet,
    parse_sprite_sheet_from_frame, AtlasError, AtlasReport, SpriteSheetConfig,
};

type Parser = fn(&mut Texture, usize, &Value) -> Result<AtlasReport, AtlasError>;

/// Registers parsed textures with a `TextureManager`.
///
/// A texture is only registered once its data parsed, so a malformed
/// document leaves the manager untouched.
pub trait TextureManagerExt {
    /// Adds a single source atlas in either JSON layout.
    fn add_atlas(
        &mut self,
        key: &str,
        source: TextureSource,
        json: &Value,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError>;

    fn add_atlas_hash(
        &mut self,
        key: &str,
        source: TextureSource,
        json: &Value,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError>;

    fn add_atlas_array(
        &mut self,
        key: &str,
        source: TextureSource,
        json: &Value,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError>;

    /// Adds an atlas spread over several sources. Either one document per
    /// source, or a single document applied to every source.
    fn add_multi_atlas(
        &mut self,
        key: &str,
        sources: Vec<TextureSource>,
        json: &[Value],
    ) -> Result<(&mut Texture, AtlasReport), AtlasError>;

    /// Adds a source cut into a uniform grid of frames.
    fn add_sprite_sheet(
        &mut self,
        key: &str,
        source: TextureSource,
        config: &SpriteSheetConfig,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError>;

    /// Adds a sprite sheet cut out of frame `frame` of texture `atlas_key`.
    /// The new texture shares the atlas source the frame lives on.
    fn add_sprite_sheet_from_atlas(
        &mut self,
        key: &str,
        atlas_key: &str,
        frame: &str,
        config: &SpriteSheetConfig,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError>;
}

fn add_with<'a>(
    manager: &'a mut TextureManager,
    key: &str,
    source: TextureSource,
    json: &Value,
    parser: Parser,
) -> Result<(&'a mut Texture, AtlasReport), AtlasError> {
    let mut texture = manager.new_texture(key, [source])?;
    let report = parser(&mut texture, 0, json)?;
    Ok((manager.insert(texture)?, report))
}

impl TextureManagerExt for TextureManager {
    fn add_atlas(
        &mut self,
        key: &str,
        source: TextureSource,
        json: &Value,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError> {
        add_with(self, key, source, json, parse_atlas)
    }

    fn add_atlas_hash(
        &mut self,
        key: &str,
        source: TextureSource,
        json: &Value,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError> {
        add_with(self, key, source, json, parse_atlas_hash)
    }

    fn add_atlas_array(
        &mut self,
        key: &str,
        source: TextureSource,
        json: &Value,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError> {
        add_with(self, key, source, json, parse_atlas_array)
    }

    fn add_multi_atlas(
        &mut self,
        key: &str,
        sources: Vec<TextureSource>,
        json: &[Value],
    ) -> Result<(&mut Texture, AtlasReport), AtlasError> {
        if json.len() != 1 && json.len() != sources.len() {
            return Err(AtlasError::Malformed(format!(
                "{} atlas documents for {} sources",
                json.len(),
                sources.len()
            )));
        }

        let source_count = sources.len();
        let mut texture = self.new_texture(key, sources)?;
        let mut report = AtlasReport::default();

        for source_index in 0..source_count {
            let document = json.get(source_index).unwrap_or(&json[0]);
            report.merge(parse_atlas(&mut texture, source_index, document)?);
        }

        Ok((self.insert(texture)?, report))
    }

    fn add_sprite_sheet(
        &mut self,
        key: &str,
        source: TextureSource,
        config: &SpriteSheetConfig,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError> {
        let region = source.bounds();
        let mut texture = self.new_texture(key, [source])?;
        let report = parse_sprite_sheet(&mut texture, 0, region, config)?;
        Ok((self.insert(texture)?, report))
    }

    fn add_sprite_sheet_from_atlas(
        &mut self,
        key: &str,
        atlas_key: &str,
        frame: &str,
        config: &SpriteSheetConfig,
    ) -> Result<(&mut Texture, AtlasReport), AtlasError> {
        let atlas = self.get(atlas_key)?;
        let sheet = atlas.frame(frame)?.clone();
        let source = atlas.source(sheet.source_index())?.clone();

        let mut texture = self.new_texture(key, [source])?;
        let report = parse_sprite_sheet_from_frame(&mut texture, 0, &sheet, config)?;
        Ok((self.insert(texture)?, report))
    }
}
