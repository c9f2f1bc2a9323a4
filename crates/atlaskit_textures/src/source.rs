use atlaskit_geometry::{is_size_power_of_two, Rect};

use crate::ScaleMode;

/// One backing image of a texture, shared by every frame cut out of it.
///
/// Frames never hold on to the source itself, only to its index within the
/// owning texture and a copy of its dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSource {
    width: u32,
    height: u32,
    is_power_of_two: bool,
    pub scale_mode: ScaleMode,
    /// Decoded RGBA pixels, when the loader hands them over.
    pub pixels: Option<Vec<u8>>,
}

impl TextureSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            is_power_of_two: is_size_power_of_two(width, height),
            scale_mode: ScaleMode::default(),
            pixels: None,
        }
    }

    pub fn with_pixels(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels: Some(pixels),
            ..Self::new(width, height)
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    #[inline]
    pub fn is_power_of_two(&self) -> bool {
        self.is_power_of_two
    }

    /// The whole source in pixel space.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as f32, self.height as f32)
    }

    /// Returns true when the size actually changed.
    pub fn update_size(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }

        self.width = width;
        self.height = height;
        self.is_power_of_two = is_size_power_of_two(width, height);
        true
    }

    pub fn set_filter(&mut self, scale_mode: ScaleMode) {
        self.scale_mode = scale_mode;
    }

    /// RGBA of the pixel at `x, y`, if the source carries pixel data.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let bytes = self.pixels.as_ref()?.get(offset..offset + 4)?;
        bytes.try_into().ok()
    }
}
