use std::{collections::HashMap, ops::RangeInclusive};

/// Packer metadata carried along with a texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtlasMeta {
    pub image: Option<String>,
    pub format: Option<String>,
    pub size: Option<[u32; 2]>,
    pub scale: Option<f32>,
    /// Named frame ranges, e.g. animation tags exported by Aseprite.
    pub frame_tags: HashMap<String, RangeInclusive<usize>>,
}

impl AtlasMeta {
    /// Merges metadata of another atlas page into this one.
    /// Scalars of `other` win, tags are combined.
    pub fn merge(&mut self, other: AtlasMeta) {
        self.image = other.image.or(self.image.take());
        self.format = other.format.or(self.format.take());
        self.size = other.size.or(self.size);
        self.scale = other.scale.or(self.scale);
        self.frame_tags.extend(other.frame_tags);
    }
}
