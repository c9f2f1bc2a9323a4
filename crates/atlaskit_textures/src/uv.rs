use atlaskit_geometry::{Quad, Rect};
use nalgebra::Vector2;

/// Normalized texture coordinates of a frame.
///
/// `u0, v0` belong to the logical top-left corner and `u1, v1` to the logical
/// bottom-right one. For a frame packed rotated the pair is already
/// compensated: `u0` sits on the right edge of the packed block and `u1` on the
/// left, so consumers must not rotate again.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UvQuad {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
    pub rotated: bool,
}

impl UvQuad {
    /// Maps a packed pixel rectangle onto a `source_size` texture.
    ///
    /// A rotated rectangle is stored turned 90 degrees clockwise, which puts
    /// the logical top-left corner at the top-right of the packed block.
    pub fn compute(cut: &Rect, source_size: [u32; 2], rotated: bool) -> Self {
        if source_size[0] == 0 || source_size[1] == 0 {
            return Self {
                rotated,
                ..Self::default()
            };
        }

        let size = Vector2::new(source_size[0] as f32, source_size[1] as f32);
        let a = Vector2::new(cut.x, cut.y).component_div(&size);
        let b = Vector2::new(cut.right(), cut.bottom()).component_div(&size);

        if rotated {
            Self {
                u0: b.x,
                v0: a.y,
                u1: a.x,
                v1: b.y,
                rotated,
            }
        } else {
            Self {
                u0: a.x,
                v0: a.y,
                u1: b.x,
                v1: b.y,
                rotated,
            }
        }
    }

    pub fn quad(&self) -> Quad {
        Quad::new([self.u0, self.v0], [self.u1, self.v1])
    }

    /// Texture coordinates of the logical corners: top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let quad = self.quad();
        if self.rotated {
            quad.points()
        } else {
            quad.transposed_points()
        }
    }

    /// The covered area of the texture regardless of orientation.
    pub fn bounds(&self) -> Rect {
        self.quad().bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_unrotated() {
        let uv = UvQuad::compute(&Rect::new(0., 0., 64., 32.), [512, 512], false);

        assert_eq!(uv.u0, 0.);
        assert_eq!(uv.v0, 0.);
        assert_eq!(uv.u1, 0.125);
        assert_eq!(uv.v1, 0.0625);
    }

    #[test]
    fn test_rotated_swaps_u() {
        let cut = Rect::new(10., 20., 30., 40.);
        let plain = UvQuad::compute(&cut, [100, 100], false);
        let rotated = UvQuad::compute(&cut, [100, 100], true);

        assert_eq!(rotated.u0, plain.u1);
        assert_eq!(rotated.u1, plain.u0);
        assert_eq!(rotated.v0, plain.v0);
        assert_eq!(rotated.v1, plain.v1);
        assert_eq!(rotated.bounds(), plain.bounds());
    }

    #[test]
    fn test_corners() {
        let cut = Rect::new(0., 0., 50., 100.);
        let plain = UvQuad::compute(&cut, [100, 100], false);
        assert_eq!(
            plain.corners(),
            [[0., 0.], [0.5, 0.], [0.5, 1.], [0., 1.]]
        );

        // The packed block is turned clockwise, so the logical top edge
        // runs down the right side of the block.
        let rotated = UvQuad::compute(&cut, [100, 100], true);
        assert_eq!(
            rotated.corners(),
            [[0.5, 0.], [0.5, 1.], [0., 1.], [0., 0.]]
        );
    }

    #[test]
    fn test_non_power_of_two_source() {
        let uv = UvQuad::compute(&Rect::new(3., 7., 11., 13.), [300, 200], false);

        assert!(approx_eq!(f32, uv.u1 - uv.u0, 11. / 300., epsilon = 1e-6));
        assert!(approx_eq!(f32, uv.v1 - uv.v0, 13. / 200., epsilon = 1e-6));
    }

    #[test]
    fn test_zero_source() {
        let uv = UvQuad::compute(&Rect::new(0., 0., 1., 1.), [0, 10], false);
        assert_eq!(uv, UvQuad::default());
    }
}
