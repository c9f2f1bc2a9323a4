use atlaskit_textures::{AtlasMeta, Frame, Texture, TextureError, BASE_FRAME};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::AtlasError;

use self::json::FrameEntry;

pub mod json;

/// Frame entries of an atlas document, in document order.
#[derive(Debug, Clone, Copy)]
pub enum AtlasFrames<'a> {
    /// `frames` is an object keyed by frame name.
    Hash(&'a Map<String, Value>),
    /// `frames` is a list of entries carrying a `filename`.
    Array(&'a [Value]),
}

/// A validated atlas document.
///
/// Only the top level is checked here. Entries are decoded one by one while
/// parsing so a broken entry costs that entry alone.
#[derive(Debug, Clone)]
pub struct AtlasData<'a> {
    pub frames: AtlasFrames<'a>,
    pub meta: Option<AtlasMeta>,
}

/// What happened to the entries of one parsed atlas document.
#[derive(Debug, Default)]
pub struct AtlasReport {
    /// Frames that did not exist before.
    pub added: Vec<String>,
    /// Frames that overwrote an existing frame of the same name.
    pub replaced: Vec<String>,
    /// Entries that were left out, with the reason.
    pub skipped: Vec<(String, AtlasError)>,
}

impl AtlasReport {
    fn skip(&mut self, name: String, error: AtlasError) {
        log::warn!("Skipping atlas frame \"{name}\": {error}");
        self.skipped.push((name, error));
    }

    pub fn merge(&mut self, other: AtlasReport) {
        self.added.extend(other.added);
        self.replaced.extend(other.replaced);
        self.skipped.extend(other.skipped);
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<'a> AtlasData<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, AtlasError> {
        let root = value.as_object().ok_or_else(|| {
            AtlasError::Malformed(format!("expected an object, got {}", kind(value)))
        })?;

        let frames = match root.get("frames") {
            Some(Value::Object(map)) => AtlasFrames::Hash(map),
            Some(Value::Array(list)) => AtlasFrames::Array(list),
            Some(other) => {
                return Err(AtlasError::Malformed(format!(
                    "\"frames\" must be an object or an array, got {}",
                    kind(other)
                )))
            }
            None => return Err(AtlasError::Malformed("missing \"frames\"".into())),
        };

        let meta = root
            .get("meta")
            .and_then(|meta| match json::Meta::deserialize(meta) {
                Ok(meta) => Some(meta.to_meta()),
                Err(e) => {
                    log::warn!("Ignoring unreadable atlas meta: {e}");
                    None
                }
            });

        Ok(Self { frames, meta })
    }

    /// Registers every entry as a frame of `texture` cut from its source
    /// `source_index`. Bad entries are skipped and listed in the report.
    pub fn parse_into(
        &self,
        texture: &mut Texture,
        source_index: usize,
    ) -> Result<AtlasReport, AtlasError> {
        texture.source(source_index)?;

        let mut report = AtlasReport::default();
        match self.frames {
            AtlasFrames::Hash(map) => {
                for (name, entry) in map {
                    add_entry(texture, source_index, name.clone(), entry, &mut report);
                }
            }
            AtlasFrames::Array(list) => {
                for (i, entry) in list.iter().enumerate() {
                    match entry.get("filename").and_then(Value::as_str) {
                        Some(name) => {
                            add_entry(texture, source_index, name.to_owned(), entry, &mut report)
                        }
                        None => {
                            let name = format!("#{i}");
                            let reason = "missing \"filename\"".to_owned();
                            report.skip(name.clone(), AtlasError::MalformedEntry { name, reason });
                        }
                    }
                }
            }
        }

        if let Some(meta) = &self.meta {
            texture
                .custom_data
                .get_or_insert_with(AtlasMeta::default)
                .merge(meta.clone());
        }

        log::debug!(
            "Parsed atlas into \"{}\" source {source_index}: {} added, {} replaced, {} skipped",
            texture.key(),
            report.added.len(),
            report.replaced.len(),
            report.skipped.len()
        );

        Ok(report)
    }
}

fn add_entry(
    texture: &mut Texture,
    source_index: usize,
    name: String,
    entry: &Value,
    report: &mut AtlasReport,
) {
    if name == BASE_FRAME {
        let reason = "the name is reserved for the whole source".to_owned();
        report.skip(name.clone(), AtlasError::MalformedEntry { name, reason });
        return;
    }

    let inserted = FrameEntry::deserialize(entry)
        .map_err(|e| AtlasError::MalformedEntry {
            name: name.clone(),
            reason: e.to_string(),
        })
        .and_then(|entry| {
            let frame = build_frame(texture, source_index, &name, &entry)?;
            Ok(texture.insert_frame(frame)?)
        });

    match inserted {
        Ok((_, Some(_))) => report.replaced.push(name),
        Ok((_, None)) => report.added.push(name),
        Err(e) => report.skip(name, e),
    }
}

fn build_frame(
    texture: &Texture,
    source_index: usize,
    name: &str,
    entry: &FrameEntry,
) -> Result<Frame, TextureError> {
    // Packers list rotated frames upright, the packed block is transposed
    let cut = match entry.rotated {
        true => entry.frame.rect().transpose(),
        false => entry.frame.rect(),
    };

    let mut frame = texture.create_frame(name, source_index, cut)?;
    frame.set_rotated(entry.rotated);

    if entry.trimmed {
        match (entry.source_size, entry.sprite_source_size) {
            (Some(size), Some(dest)) => {
                frame.set_trim(size.w, size.h, dest.rect())?;
            }
            _ => {
                return Err(TextureError::InvalidFrameRect {
                    name: name.to_owned(),
                    reason: "trimmed without sourceSize and spriteSourceSize".into(),
                })
            }
        }
    }

    if let Some(pivot) = entry.anchor.or(entry.pivot) {
        frame.set_pivot(pivot.x, pivot.y);
    }

    if let Some(borders) = entry.scale9_borders {
        frame.set_scale9(borders.rect());
    }

    Ok(frame)
}

/// Parses a JSON Hash atlas, where `frames` maps names to entries.
pub fn parse_atlas_hash(
    texture: &mut Texture,
    source_index: usize,
    json: &Value,
) -> Result<AtlasReport, AtlasError> {
    let data = AtlasData::from_value(json)?;
    if let AtlasFrames::Array(_) = data.frames {
        return Err(AtlasError::Malformed(
            "expected \"frames\" to be an object".into(),
        ));
    }

    data.parse_into(texture, source_index)
}

/// Parses a JSON Array atlas, where `frames` lists entries named by `filename`.
pub fn parse_atlas_array(
    texture: &mut Texture,
    source_index: usize,
    json: &Value,
) -> Result<AtlasReport, AtlasError> {
    let data = AtlasData::from_value(json)?;
    if let AtlasFrames::Hash(_) = data.frames {
        return Err(AtlasError::Malformed(
            "expected \"frames\" to be an array".into(),
        ));
    }

    data.parse_into(texture, source_index)
}

/// Parses either layout, picking it from the shape of `frames`.
pub fn parse_atlas(
    texture: &mut Texture,
    source_index: usize,
    json: &Value,
) -> Result<AtlasReport, AtlasError> {
    AtlasData::from_value(json)?.parse_into(texture, source_index)
}

/// Like `parse_atlas`, straight from JSON text.
pub fn parse_atlas_str(
    texture: &mut Texture,
    source_index: usize,
    json: &str,
) -> Result<AtlasReport, AtlasError> {
    let value: Value = serde_json::from_str(json)?;
    parse_atlas(texture, source_index, &value)
}
