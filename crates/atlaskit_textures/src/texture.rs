use atlaskit_collections::IndexedMap;
use atlaskit_geometry::Rect;

use crate::{AtlasMeta, Frame, ScaleMode, TextureError, TextureSource};

/// Name of the frame covering the whole of the first source.
pub const BASE_FRAME: &str = "__BASE";

/// A set of sources and the named frames cut out of them.
///
/// A texture always holds a `__BASE` frame at index 0 spanning source 0.
/// Frames are addressed by name or by the index they got on insertion.
#[derive(Debug, Clone)]
pub struct Texture {
    key: String,
    sources: Vec<TextureSource>,
    frames: IndexedMap<String, Frame>,
    first_frame: String,
    pub custom_data: Option<AtlasMeta>,
}

impl Texture {
    pub fn new(
        key: impl Into<String>,
        sources: impl IntoIterator<Item = TextureSource>,
    ) -> Result<Self, TextureError> {
        let key = key.into();
        let sources: Vec<_> = sources.into_iter().collect();

        let base = match sources.first() {
            Some(source) => Frame::new(BASE_FRAME, 0, source, source.bounds())?,
            None => return Err(TextureError::NoSources(key)),
        };

        let mut texture = Self {
            key,
            sources,
            frames: IndexedMap::default(),
            first_frame: BASE_FRAME.to_owned(),
            custom_data: None,
        };
        texture.insert_frame(base)?;

        Ok(texture)
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn sources(&self) -> &[TextureSource] {
        &self.sources
    }

    pub fn source(&self, index: usize) -> Result<&TextureSource, TextureError> {
        self.sources
            .get(index)
            .ok_or_else(|| TextureError::SourceNotFound {
                texture: self.key.clone(),
                index,
            })
    }

    /// Builds a frame for this texture without registering it.
    pub fn create_frame(
        &self,
        name: impl Into<String>,
        source_index: usize,
        cut: Rect,
    ) -> Result<Frame, TextureError> {
        Frame::new(name, source_index, self.source(source_index)?, cut)
    }

    /// Creates and registers an untrimmed frame, returning its index.
    pub fn add_frame(
        &mut self,
        name: impl Into<String>,
        source_index: usize,
        cut: Rect,
    ) -> Result<usize, TextureError> {
        let frame = self.create_frame(name, source_index, cut)?;
        Ok(self.insert_frame(frame)?.0)
    }

    /// Registers a frame under its name. An existing frame with the same
    /// name is replaced in place, keeps its index and is handed back.
    ///
    /// The frame must have been cut from one of this texture's sources.
    pub fn insert_frame(&mut self, frame: Frame) -> Result<(usize, Option<Frame>), TextureError> {
        let source = self.source(frame.source_index())?;
        if frame.source_size() != source.size() {
            let [w, h] = frame.source_size();
            return Err(TextureError::invalid_rect(
                frame.name(),
                format!(
                    "cut from a {w}x{h} source, source {} of \"{}\" is {}x{}",
                    frame.source_index(),
                    self.key,
                    source.width(),
                    source.height()
                ),
            ));
        }

        let name = frame.name().to_owned();
        let (index, replaced) = self.frames.insert(name.clone(), frame);
        if let Some(frame) = self.frames.get_mut(index) {
            frame.set_index(index);
        }

        if replaced.is_some() && name != BASE_FRAME {
            log::warn!(
                "Texture \"{}\" already had a frame \"{name}\", replacing it",
                self.key
            );
        }

        if self.first_frame == BASE_FRAME && name != BASE_FRAME {
            self.first_frame = name;
        }

        Ok((index, replaced))
    }

    /// Removes a frame. `__BASE` can't be removed.
    pub fn remove_frame(&mut self, name: &str) -> bool {
        if name == BASE_FRAME || self.frames.remove(name).is_none() {
            return false;
        }

        if self.first_frame == name {
            self.first_frame = self
                .frames
                .keys()
                .find(|k| *k != BASE_FRAME)
                .cloned()
                .unwrap_or_else(|| BASE_FRAME.to_owned());
        }

        true
    }

    pub fn has(&self, name: &str) -> bool {
        self.frames.contains_key(name)
    }

    pub fn frame(&self, name: &str) -> Result<&Frame, TextureError> {
        self.frames
            .get_by_key(name)
            .ok_or_else(|| self.frame_not_found(name))
    }

    pub fn frame_mut(&mut self, name: &str) -> Result<&mut Frame, TextureError> {
        match self.frames.get_index(name) {
            Some(index) => self.frame_at_mut(index),
            None => Err(self.frame_not_found(name)),
        }
    }

    pub fn frame_at(&self, index: usize) -> Result<&Frame, TextureError> {
        self.frames
            .get(index)
            .ok_or_else(|| TextureError::FrameIndexOutOfRange {
                texture: self.key.clone(),
                index,
            })
    }

    pub fn frame_at_mut(&mut self, index: usize) -> Result<&mut Frame, TextureError> {
        let key = &self.key;
        self.frames
            .get_mut(index)
            .ok_or_else(|| TextureError::FrameIndexOutOfRange {
                texture: key.clone(),
                index,
            })
    }

    pub fn frame_index(&self, name: &str) -> Option<usize> {
        self.frames.get_index(name)
    }

    #[inline]
    pub fn base_frame(&self) -> &Frame {
        &self.frames[0]
    }

    /// The first frame added after `__BASE`, or `__BASE` when there is none.
    #[inline]
    pub fn first_frame(&self) -> &str {
        &self.first_frame
    }

    /// Number of frames, `__BASE` included.
    #[inline]
    pub fn frame_total(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }

    /// Frame names in insertion order.
    pub fn frame_names(&self, include_base: bool) -> Vec<&str> {
        self.frames
            .keys()
            .map(String::as_str)
            .filter(|name| include_base || *name != BASE_FRAME)
            .collect()
    }

    pub fn frames_from_source(&self, source_index: usize, include_base: bool) -> Vec<&Frame> {
        self.frames
            .values()
            .filter(|frame| frame.source_index() == source_index)
            .filter(|frame| include_base || frame.name() != BASE_FRAME)
            .collect()
    }

    /// The area of a source covered by frames, `__BASE` included.
    pub fn frame_bounds(&self, source_index: usize) -> Option<Rect> {
        self.frames_from_source(source_index, true)
            .into_iter()
            .map(Frame::cut)
            .reduce(|a, b| a.union(&b))
    }

    pub fn set_filter(&mut self, scale_mode: ScaleMode) {
        for source in &mut self.sources {
            source.set_filter(scale_mode);
        }
    }

    /// Resizes a source and recomputes every frame cut out of it.
    /// `__BASE` grows or shrinks with source 0.
    ///
    /// Nothing changes when the new size is empty or would leave a frame
    /// hanging over the edge.
    pub fn update_source_size(
        &mut self,
        index: usize,
        width: u32,
        height: u32,
    ) -> Result<(), TextureError> {
        self.source(index)?;

        if width == 0 || height == 0 {
            return Err(TextureError::invalid_rect(
                BASE_FRAME,
                format!("source {index} of \"{}\" can't be resized to {width}x{height}", self.key),
            ));
        }

        for frame in self.frames_from_source(index, false) {
            frame.check_source_size([width, height])?;
        }

        let bounds = Rect::from_size(width as f32, height as f32);
        if !self.sources[index].update_size(width, height) {
            return Ok(());
        }

        for (_, name, frame) in self.frames.iter_mut() {
            if frame.source_index() != index {
                continue;
            }

            frame.set_source_size([width, height]);
            if name == BASE_FRAME {
                frame.set_size(bounds)?;
            }
        }

        log::debug!(
            "Resized source {index} of \"{}\" to {width}x{height}",
            self.key
        );

        Ok(())
    }

    /// RGBA at `x, y` in the logical space of frame `name`. Trimmed-away
    /// borders read as transparent. `None` outside the frame or when the
    /// source carries no pixel data.
    pub fn pixel(&self, name: &str, x: f32, y: f32) -> Result<Option<[u8; 4]>, TextureError> {
        let frame = self.frame(name)?;
        let source = self.source(frame.source_index())?;

        if source.pixels.is_none()
            || !Rect::from_size(frame.width(), frame.height()).contains(x, y)
        {
            return Ok(None);
        }

        Ok(match frame.source_pixel(x, y) {
            Some([px, py]) => source.pixel(px, py),
            None => Some([0; 4]),
        })
    }

    pub fn pixel_alpha(&self, name: &str, x: f32, y: f32) -> Result<Option<u8>, TextureError> {
        Ok(self.pixel(name, x, y)?.map(|[_, _, _, a]| a))
    }

    fn frame_not_found(&self, name: &str) -> TextureError {
        TextureError::FrameNotFound {
            texture: self.key.clone(),
            frame: name.to_owned(),
        }
    }
}
