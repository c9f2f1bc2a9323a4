use atlaskit_geometry::Rect;

use crate::{Frame, UvQuad};

/// A runtime view restricting which part of a frame gets drawn.
///
/// Crop rectangles are given in logical frame space, with the origin at the
/// top-left of the untrimmed frame. The frame's own cut and UVs are never
/// touched; the crop carries its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crop {
    /// The rectangle as requested.
    pub requested: Rect,
    pub flip_x: bool,
    pub flip_y: bool,
    /// The visible part of the request in logical space.
    pub rect: Rect,
    /// Packed pixels backing `rect`, always inside the frame's cut.
    pub cut: Rect,
    pub uv: UvQuad,
    /// False when the request covers no packed pixels. `rect`, `cut` and `uv`
    /// then keep the values of the last visible crop.
    pub is_valid: bool,
}

impl Frame {
    pub fn set_crop(&mut self, rect: Rect) -> &Crop {
        self.set_crop_flipped(rect, false, false)
    }

    /// Crops a frame which is drawn mirrored. The crop stays in display space,
    /// so the sampled pixels are mirrored within the packed region.
    pub fn set_crop_flipped(&mut self, rect: Rect, flip_x: bool, flip_y: bool) -> &Crop {
        let crop = self.compute_crop(rect, flip_x, flip_y);
        self.crop.insert(crop)
    }

    /// Re-applies the current crop with new flip flags.
    pub fn refresh_crop(&mut self, flip_x: bool, flip_y: bool) -> Option<&Crop> {
        let requested = self.crop.as_ref()?.requested;
        Some(self.set_crop_flipped(requested, flip_x, flip_y))
    }

    pub fn clear_crop(&mut self) {
        self.crop = None;
    }

    #[inline]
    pub fn crop(&self) -> Option<&Crop> {
        self.crop.as_ref()
    }

    #[inline]
    pub fn is_cropped(&self) -> bool {
        self.crop.is_some()
    }

    pub(crate) fn reapply_crop(&mut self) {
        if let Some(crop) = self.crop {
            self.set_crop_flipped(crop.requested, crop.flip_x, crop.flip_y);
        }
    }

    fn compute_crop(&self, requested: Rect, flip_x: bool, flip_y: bool) -> Crop {
        let bounds = Rect::from_size(self.width(), self.height());
        // Only the trimmed region holds packed pixels
        let region = match self.trim() {
            Some(trim) => trim.sprite_source_size,
            None => bounds,
        };

        let visible = bounds.intersection(&requested).intersection(&region);
        let cut = Some(visible)
            .filter(|v| !v.is_empty())
            .map(|v| self.packed_rect(&v, &region, flip_x, flip_y))
            .filter(|c| !c.is_empty());

        match cut {
            Some(cut) => Crop {
                requested,
                flip_x,
                flip_y,
                rect: visible,
                cut,
                uv: UvQuad::compute(&cut, self.source_size(), self.rotated()),
                is_valid: true,
            },
            None => {
                log::debug!(
                    "Crop {requested:?} of frame \"{}\" covers no pixels",
                    self.name()
                );

                let (rect, cut, uv) = match &self.crop {
                    Some(previous) => (previous.rect, previous.cut, previous.uv),
                    None => (visible, self.cut(), self.uv()),
                };

                Crop {
                    requested,
                    flip_x,
                    flip_y,
                    rect,
                    cut,
                    uv,
                    is_valid: false,
                }
            }
        }
    }

    /// Maps a logical rectangle inside `region` onto the packed pixels.
    fn packed_rect(&self, visible: &Rect, region: &Rect, flip_x: bool, flip_y: bool) -> Rect {
        let local = visible.translate(-region.x, -region.y).mirror(
            region.width,
            region.height,
            flip_x,
            flip_y,
        );

        let cut = self.cut();
        let packed = if self.rotated() {
            // Clockwise storage: logical x runs down the block, logical y runs
            // leftwards from its right edge.
            Rect::new(
                cut.width - local.y - local.height,
                local.x,
                local.height,
                local.width,
            )
        } else {
            local
        };

        packed.translate(cut.x, cut.y).intersection(&cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextureSource;

    fn frame(cut: Rect) -> Frame {
        Frame::new("f", 0, &TextureSource::new(256, 256), cut).unwrap()
    }

    fn assert_contained(frame: &Frame) {
        let crop = frame.crop().unwrap();
        assert!(
            frame.cut().contains_rect(&crop.cut),
            "{:?} escapes {:?}",
            crop.cut,
            frame.cut()
        );
    }

    #[test]
    fn test_crop_untrimmed() {
        let mut frame = frame(Rect::new(64., 32., 64., 64.));
        let crop = *frame.set_crop(Rect::new(16., 8., 32., 16.));

        assert!(crop.is_valid);
        assert_eq!(crop.rect, Rect::new(16., 8., 32., 16.));
        assert_eq!(crop.cut, Rect::new(80., 40., 32., 16.));
        assert_eq!(crop.uv, UvQuad::compute(&crop.cut, [256, 256], false));

        // Base geometry untouched
        assert_eq!(frame.cut(), Rect::new(64., 32., 64., 64.));
        assert_eq!(frame.uv(), UvQuad::compute(&frame.cut(), [256, 256], false));

        let geometry = frame.draw_geometry();
        assert_eq!(geometry.cut, crop.cut);
        assert_eq!(geometry.dest, crop.rect);
        assert!(geometry.visible);
    }

    #[test]
    fn test_crop_is_clamped_to_frame() {
        let mut frame = frame(Rect::new(0., 0., 32., 32.));
        let crop = *frame.set_crop(Rect::new(-10., 20., 100., 100.));

        assert_eq!(crop.rect, Rect::new(0., 20., 32., 12.));
        assert_eq!(crop.cut, Rect::new(0., 20., 32., 12.));
        assert_contained(&frame);
    }

    #[test]
    fn test_empty_crop_keeps_previous_values() {
        let mut frame = frame(Rect::new(0., 0., 32., 32.));
        let visible = *frame.set_crop(Rect::new(0., 0., 8., 8.));

        let hidden = *frame.set_crop(Rect::new(40., 40., 8., 8.));
        assert!(!hidden.is_valid);
        assert_eq!(hidden.cut, visible.cut);
        assert_eq!(hidden.uv, visible.uv);
        assert_eq!(hidden.requested, Rect::new(40., 40., 8., 8.));
        assert!(!frame.draw_geometry().visible);

        // Zero sized requests are invisible too
        assert!(!frame.set_crop(Rect::new(0., 0., 0., 8.)).is_valid);
    }

    #[test]
    fn test_crop_is_idempotent_and_clear_restores() {
        let mut frame = frame(Rect::new(10., 10., 50., 40.));
        let before = frame.clone();

        let once = *frame.set_crop(Rect::new(5., 5., 20., 20.));
        let twice = *frame.set_crop(Rect::new(5., 5., 20., 20.));
        assert_eq!(once, twice);

        frame.set_crop(Rect::new(1., 2., 3., 4.));
        frame.set_crop(Rect::new(100., 2., 3., 4.));
        frame.clear_crop();

        assert!(!frame.is_cropped());
        assert_eq!(frame, before);
        assert_eq!(frame.draw_geometry(), before.draw_geometry());
    }

    #[test]
    fn test_crop_trimmed_frame() {
        // 20x30 of pixels sitting at 10,5 inside a 40x50 sprite
        let mut frame = frame(Rect::new(100., 100., 20., 30.));
        frame.set_trim(40., 50., Rect::new(10., 5., 20., 30.)).unwrap();

        let crop = *frame.set_crop(Rect::new(0., 0., 20., 20.));
        assert!(crop.is_valid);
        assert_eq!(crop.rect, Rect::new(10., 5., 10., 15.));
        assert_eq!(crop.cut, Rect::new(100., 100., 10., 15.));
        assert_contained(&frame);

        let crop = *frame.set_crop(Rect::new(25., 30., 100., 100.));
        assert_eq!(crop.rect, Rect::new(25., 30., 5., 5.));
        assert_eq!(crop.cut, Rect::new(115., 125., 5., 5.));
        assert_contained(&frame);

        // Only transparent border
        let crop = *frame.set_crop(Rect::new(0., 0., 10., 50.));
        assert!(!crop.is_valid);
    }

    #[test]
    fn test_crop_rotated_frame() {
        // 20x40 block on the atlas, 40x20 on screen
        let mut frame = frame(Rect::new(0., 0., 20., 40.));
        frame.set_rotated(true);
        assert_eq!((frame.width(), frame.height()), (40., 20.));

        // Left quarter of the sprite is the top of the block
        let crop = *frame.set_crop(Rect::new(0., 0., 10., 20.));
        assert_eq!(crop.cut, Rect::new(0., 0., 20., 10.));
        assert_eq!(crop.uv, UvQuad::compute(&crop.cut, [256, 256], true));
        assert!(crop.uv.u0 > crop.uv.u1);
        assert_contained(&frame);

        // Top strip of the sprite is the right edge of the block
        let crop = *frame.set_crop(Rect::new(0., 0., 40., 5.));
        assert_eq!(crop.cut, Rect::new(15., 0., 5., 40.));
        assert_contained(&frame);

        // Full crop maps back to the whole block
        let crop = *frame.set_crop(Rect::new(0., 0., 40., 20.));
        assert_eq!(crop.cut, frame.cut());
        assert_eq!(crop.uv, frame.uv());
    }

    #[test]
    fn test_crop_rotated_and_trimmed_frame() {
        // 20x30 block at 50,60 holds 30x20 pixels sitting at 5,10 of a 40x40 sprite
        let mut frame = frame(Rect::new(50., 60., 20., 30.));
        frame.set_rotated(true);
        frame.set_trim(40., 40., Rect::new(5., 10., 30., 20.)).unwrap();

        // Top-left of the pixels is the top-right of the block
        let crop = *frame.set_crop(Rect::new(0., 0., 20., 20.));
        assert!(crop.is_valid);
        assert_eq!(crop.rect, Rect::new(5., 10., 15., 10.));
        assert_eq!(crop.cut, Rect::new(60., 60., 10., 15.));
        assert_eq!(
            (crop.uv.u0, crop.uv.v0, crop.uv.u1, crop.uv.v1),
            (70. / 256., 60. / 256., 60. / 256., 75. / 256.)
        );
        assert_contained(&frame);

        // Bottom-right of the pixels is the bottom-left of the block
        let crop = *frame.set_crop(Rect::new(20., 25., 100., 100.));
        assert_eq!(crop.rect, Rect::new(20., 25., 15., 5.));
        assert_eq!(crop.cut, Rect::new(50., 75., 5., 15.));
        assert_eq!(crop.uv, UvQuad::compute(&crop.cut, [256, 256], true));
        assert_contained(&frame);

        // Whole sprite maps back to the whole block
        let crop = *frame.set_crop(Rect::new(0., 0., 40., 40.));
        assert_eq!(crop.rect, Rect::new(5., 10., 30., 20.));
        assert_eq!(crop.cut, frame.cut());
        assert_eq!(crop.uv, frame.uv());
    }

    #[test]
    fn test_crop_flipped_rotated_frame() {
        // 20x40 block on the atlas, 40x20 on screen
        let mut frame = frame(Rect::new(0., 0., 20., 40.));
        frame.set_rotated(true);

        // Mirrored horizontally the left quarter shows the bottom of the block
        let crop = *frame.set_crop_flipped(Rect::new(0., 0., 10., 20.), true, false);
        assert_eq!(crop.rect, Rect::new(0., 0., 10., 20.));
        assert_eq!(crop.cut, Rect::new(0., 30., 20., 10.));
        assert_eq!(
            (crop.uv.u0, crop.uv.v0, crop.uv.u1, crop.uv.v1),
            (20. / 256., 30. / 256., 0., 40. / 256.)
        );
        assert_contained(&frame);

        // Mirrored vertically the top strip shows the left edge of the block
        let crop = *frame.set_crop_flipped(Rect::new(0., 0., 40., 5.), false, true);
        assert_eq!(crop.cut, Rect::new(0., 0., 5., 40.));
        assert_contained(&frame);

        let crop = *frame.refresh_crop(false, false).unwrap();
        assert_eq!(crop.cut, Rect::new(15., 0., 5., 40.));
    }

    #[test]
    fn test_crop_flipped() {
        let mut frame = frame(Rect::new(0., 0., 32., 16.));

        let crop = *frame.set_crop_flipped(Rect::new(0., 0., 8., 16.), true, false);
        assert_eq!(crop.rect, Rect::new(0., 0., 8., 16.));
        assert_eq!(crop.cut, Rect::new(24., 0., 8., 16.));

        let crop = *frame.refresh_crop(false, false).unwrap();
        assert_eq!(crop.cut, Rect::new(0., 0., 8., 16.));

        let crop = *frame.refresh_crop(false, true).unwrap();
        assert_eq!(crop.cut, Rect::new(0., 0., 8., 16.));
        assert!(crop.flip_y);
    }

    #[test]
    fn test_crop_follows_geometry_changes() {
        let mut frame = frame(Rect::new(0., 0., 32., 32.));
        frame.set_crop(Rect::new(0., 0., 16., 16.));

        frame.set_size(Rect::new(64., 64., 32., 32.)).unwrap();
        assert_eq!(frame.crop().unwrap().cut, Rect::new(64., 64., 16., 16.));
        assert_contained(&frame);
    }

    #[test]
    fn test_refresh_without_crop() {
        let mut frame = frame(Rect::new(0., 0., 32., 32.));
        assert!(frame.refresh_crop(true, true).is_none());
    }
}
