use atlaskit_geometry::Rect;

use crate::{crop::Crop, TextureError, TextureSource, UvQuad};

/// Trim data of a frame whose transparent border was cut away by the packer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trim {
    /// Size of the sprite before trimming.
    pub source_size: [f32; 2],
    /// Position and size of the packed pixels within `source_size`.
    pub sprite_source_size: Rect,
}

/// Nine-slice borders in logical frame space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale9 {
    pub borders: Rect,
    /// Borders spanning the whole height only split the frame horizontally.
    pub is_3slice: bool,
}

/// Everything a renderer reads from a frame for one draw call.
/// When a crop is active this already reflects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawGeometry {
    /// Packed pixels to sample, in source pixel space.
    pub cut: Rect,
    pub uv: UvQuad,
    /// Where the sampled pixels land inside the logical frame box.
    pub dest: Rect,
    pub width: f32,
    pub height: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub rotated: bool,
    /// False when an active crop leaves nothing to draw.
    pub visible: bool,
}

/// A named region of a texture source.
///
/// The cut rectangle is where the pixels live on the source. The logical
/// size is what the rest of the engine treats as the frame size: the cut
/// size, swapped for rotated frames, or the untrimmed size for trimmed ones.
///
/// Every mutator ends in `recompute`, so logical size, center, radius, UVs
/// and an active crop are never stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    index: usize,
    source_index: usize,
    source_size: [u32; 2],

    cut: Rect,
    trim: Option<Trim>,
    rotated: bool,

    x: f32,
    y: f32,
    width: f32,
    height: f32,
    center: [f32; 2],
    radius: f32,
    uv: UvQuad,

    pivot: Option<[f32; 2]>,
    scale9: Option<Scale9>,
    pub(crate) crop: Option<Crop>,
}

fn validate_cut(name: &str, cut: &Rect, source_size: [u32; 2]) -> Result<(), TextureError> {
    if !(cut.width > 0. && cut.height > 0.) {
        return Err(TextureError::invalid_rect(
            name,
            format!("size must be positive, got {}x{}", cut.width, cut.height),
        ));
    }

    if !(cut.x >= 0. && cut.y >= 0.) {
        return Err(TextureError::invalid_rect(
            name,
            format!("origin {},{} is negative", cut.x, cut.y),
        ));
    }

    let [w, h] = source_size;
    if cut.right() > w as f32 || cut.bottom() > h as f32 {
        return Err(TextureError::invalid_rect(
            name,
            format!(
                "{}x{} at {},{} does not fit the {w}x{h} source",
                cut.width, cut.height, cut.x, cut.y
            ),
        ));
    }

    Ok(())
}

fn validate_trim(name: &str, source_size: [f32; 2], dest: &Rect) -> Result<(), TextureError> {
    let [w, h] = source_size;
    if !(w > 0. && h > 0.) {
        return Err(TextureError::invalid_rect(
            name,
            format!("trimmed source size must be positive, got {w}x{h}"),
        ));
    }

    if !(dest.width > 0. && dest.height > 0. && dest.x >= 0. && dest.y >= 0.) {
        return Err(TextureError::invalid_rect(
            name,
            format!("sprite source rectangle {dest:?} is degenerate"),
        ));
    }

    if dest.right() > w || dest.bottom() > h {
        return Err(TextureError::invalid_rect(
            name,
            format!("sprite source rectangle {dest:?} exceeds the {w}x{h} source size"),
        ));
    }

    Ok(())
}

impl Frame {
    /// Creates an untrimmed, unrotated frame cutting `cut` out of `source`.
    pub fn new(
        name: impl Into<String>,
        source_index: usize,
        source: &TextureSource,
        cut: Rect,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        validate_cut(&name, &cut, source.size())?;

        let mut frame = Self {
            name,
            index: 0,
            source_index,
            source_size: source.size(),
            cut,
            trim: None,
            rotated: false,
            x: 0.,
            y: 0.,
            width: 0.,
            height: 0.,
            center: [0., 0.],
            radius: 0.,
            uv: UvQuad::default(),
            pivot: None,
            scale9: None,
            crop: None,
        };
        frame.recompute();

        Ok(frame)
    }

    /// Resets the frame to a new untrimmed cut rectangle.
    pub fn set_size(&mut self, cut: Rect) -> Result<&mut Self, TextureError> {
        validate_cut(&self.name, &cut, self.source_size)?;

        self.cut = cut;
        self.trim = None;
        self.recompute();

        Ok(self)
    }

    /// Marks the frame as trimmed.
    ///
    /// `actual_width` x `actual_height` becomes the logical size and `dest`
    /// is where the packed pixels sit inside it. The cut rectangle is left
    /// alone, and the center is taken from the logical size, so it is
    /// generally not the center of the packed pixels.
    pub fn set_trim(
        &mut self,
        actual_width: f32,
        actual_height: f32,
        dest: Rect,
    ) -> Result<&mut Self, TextureError> {
        let source_size = [actual_width, actual_height];
        validate_trim(&self.name, source_size, &dest)?;

        self.trim = Some(Trim {
            source_size,
            sprite_source_size: dest,
        });
        self.recompute();

        Ok(self)
    }

    /// Flags the packed pixels as stored rotated 90 degrees clockwise.
    pub fn set_rotated(&mut self, rotated: bool) -> &mut Self {
        self.rotated = rotated;
        self.recompute();
        self
    }

    /// Sets a custom pivot, normalized to the logical size.
    pub fn set_pivot(&mut self, x: f32, y: f32) -> &mut Self {
        self.pivot = Some([x, y]);
        self
    }

    pub fn clear_pivot(&mut self) -> &mut Self {
        self.pivot = None;
        self
    }

    pub fn set_scale9(&mut self, borders: Rect) -> &mut Self {
        self.scale9 = Some(Scale9 {
            borders,
            is_3slice: borders.y == 0. && borders.height == self.height,
        });
        self
    }

    /// Fails when the cut rectangle would not fit a source of `source_size`.
    pub(crate) fn check_source_size(&self, source_size: [u32; 2]) -> Result<(), TextureError> {
        validate_cut(&self.name, &self.cut, source_size)
    }

    /// Follows a resize of the backing source. Callers check the cut still
    /// fits first.
    pub(crate) fn set_source_size(&mut self, source_size: [u32; 2]) {
        self.source_size = source_size;
        self.recompute();
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    fn recompute(&mut self) {
        let (x, y, width, height) = match &self.trim {
            Some(trim) => (
                trim.sprite_source_size.x,
                trim.sprite_source_size.y,
                trim.source_size[0],
                trim.source_size[1],
            ),
            None if self.rotated => (0., 0., self.cut.height, self.cut.width),
            None => (0., 0., self.cut.width, self.cut.height),
        };

        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self.center = [width / 2., height / 2.];
        self.radius = Rect::from_size(width, height).radius();
        self.uv = UvQuad::compute(&self.cut, self.source_size, self.rotated);

        self.reapply_crop();
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the frame within its texture's frame registry.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    #[inline]
    pub fn source_size(&self) -> [u32; 2] {
        self.source_size
    }

    /// Packed pixels in source space, ignoring any crop.
    #[inline]
    pub fn cut(&self) -> Rect {
        self.cut
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.center[0]
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.center[1]
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Base UVs, ignoring any crop.
    #[inline]
    pub fn uv(&self) -> UvQuad {
        self.uv
    }

    #[inline]
    pub fn trim(&self) -> Option<&Trim> {
        self.trim.as_ref()
    }

    #[inline]
    pub fn is_trimmed(&self) -> bool {
        self.trim.is_some()
    }

    #[inline]
    pub fn rotated(&self) -> bool {
        self.rotated
    }

    #[inline]
    pub fn pivot(&self) -> Option<[f32; 2]> {
        self.pivot
    }

    #[inline]
    pub fn custom_pivot(&self) -> bool {
        self.pivot.is_some()
    }

    #[inline]
    pub fn scale9(&self) -> Option<&Scale9> {
        self.scale9.as_ref()
    }

    /// Maps a point in logical frame space onto the packed pixel holding it.
    /// `None` outside the frame and over trimmed-away borders.
    pub fn source_pixel(&self, x: f32, y: f32) -> Option<[u32; 2]> {
        if !Rect::from_size(self.width, self.height).contains(x, y) {
            return None;
        }

        let region = match &self.trim {
            Some(trim) => trim.sprite_source_size,
            None => Rect::from_size(self.width, self.height),
        };
        if !region.contains(x, y) {
            return None;
        }

        let (lx, ly) = ((x - region.x).floor(), (y - region.y).floor());
        let (px, py) = if self.rotated {
            (self.cut.x + self.cut.width - 1. - ly, self.cut.y + lx)
        } else {
            (self.cut.x + lx, self.cut.y + ly)
        };

        Some([px as u32, py as u32])
    }

    pub fn draw_geometry(&self) -> DrawGeometry {
        let dest = match &self.trim {
            Some(trim) => trim.sprite_source_size,
            None => Rect::from_size(self.width, self.height),
        };

        let (cut, uv, dest, visible) = match &self.crop {
            Some(crop) => (crop.cut, crop.uv, crop.rect, crop.is_valid),
            None => (self.cut, self.uv, dest, true),
        };

        DrawGeometry {
            cut,
            uv,
            dest,
            width: self.width,
            height: self.height,
            center_x: self.center[0],
            center_y: self.center[1],
            rotated: self.rotated,
            visible,
        }
    }
}
