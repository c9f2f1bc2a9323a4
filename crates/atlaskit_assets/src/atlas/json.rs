use std::collections::HashMap;

use atlaskit_geometry::Rect as GRect;
use atlaskit_textures::AtlasMeta;
use serde::Deserialize;
use serde_json::Value;

/// One packed sprite as exported by TexturePacker, Aseprite and friends.
/// `frame` is given in the sprite's upright orientation even when the
/// pixels were packed rotated.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FrameEntry {
    /// Only present in the array layout.
    pub filename: Option<String>,
    pub frame: Rect,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub trimmed: bool,
    pub sprite_source_size: Option<Rect>,
    pub source_size: Option<Size>,
    pub anchor: Option<Point>,
    pub pivot: Option<Point>,
    pub scale9_borders: Option<Rect>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FrameTag {
    pub name: String,
    pub from: usize,
    pub to: usize,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    pub image: Option<String>,
    pub format: Option<String>,
    pub size: Option<Size>,
    /// Packers disagree on whether this is a number or a string.
    pub scale: Option<Value>,
    pub frame_tags: Vec<FrameTag>,
}

impl Rect {
    pub fn rect(&self) -> GRect {
        GRect::new(self.x, self.y, self.w, self.h)
    }
}

impl Meta {
    pub fn to_meta(&self) -> AtlasMeta {
        let scale = match &self.scale {
            Some(Value::Number(n)) => n.as_f64().map(|s| s as f32),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        AtlasMeta {
            image: self.image.clone(),
            format: self.format.clone(),
            size: self.size.map(|s| [s.w as u32, s.h as u32]),
            scale,
            frame_tags: self
                .frame_tags
                .iter()
                .map(|f| (f.name.clone(), f.from..=f.to))
                .collect::<HashMap<_, _>>(),
        }
    }
}
