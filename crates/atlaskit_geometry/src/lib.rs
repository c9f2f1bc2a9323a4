use derive_more::Constructor;

/// An axis-aligned rectangle defined by its top-left corner and its size.
/// Y grows downwards, the way image and atlas pixel space does.
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// A rectangle at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0., 0., width, height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width / 2., self.y + self.height / 2.]
    }

    /// A rectangle with no area covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0. || self.height <= 0.
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        !self.is_empty() && x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if `other` lies fully inside this rectangle. Edges may touch.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).is_empty()
    }

    /// The overlapping area of two rectangles.
    /// When they do not overlap the result has a zero width or height,
    /// positioned at the clamped corner, and `is_empty` returns true.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Rect::new(x, y, (right - x).max(0.), (bottom - y).max(0.))
    }

    /// The smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::new(x, y, right - x, bottom - y)
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Swaps width and height, keeping the origin.
    pub fn transpose(self) -> Self {
        Self::new(self.x, self.y, self.height, self.width)
    }

    /// Mirrors this rectangle inside a `width` x `height` box anchored at the origin.
    pub fn mirror(self, width: f32, height: f32, flip_x: bool, flip_y: bool) -> Self {
        let x = if flip_x { width - self.x - self.width } else { self.x };
        let y = if flip_y { height - self.y - self.height } else { self.y };

        Self::new(x, y, self.width, self.height)
    }

    /// Length of the half-diagonal.
    pub fn radius(&self) -> f32 {
        0.5 * (self.width * self.width + self.height * self.height).sqrt()
    }

    /// Two-point form of this rectangle, top-left to bottom-right.
    pub fn quad(&self) -> Quad {
        Quad::new([self.x, self.y], [self.right(), self.bottom()])
    }
}

/// Opposite corners of a rectangle, `a` being the one drawn first.
///
/// Unlike `Rect` the corners are not ordered, so a quad with `a` on the
/// right edge describes the same area walked mirrored. UV quads of rotated
/// frames rely on that.
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq)]
pub struct Quad {
    pub a: [f32; 2],
    pub b: [f32; 2],
}

impl Quad {
    pub fn flip_y(self) -> Self {
        Self::new([self.a[0], -self.a[1]], [self.b[0], -self.b[1]])
    }

    /// Corners walking from `a` along the y axis first.
    #[inline]
    pub fn points(&self) -> [[f32; 2]; 4] {
        [
            [self.a[0], self.a[1]],
            [self.a[0], self.b[1]],
            [self.b[0], self.b[1]],
            [self.b[0], self.a[1]],
        ]
    }

    /// Corners walking from `a` along the x axis first.
    #[inline]
    pub fn transposed_points(&self) -> [[f32; 2]; 4] {
        [
            [self.a[0], self.a[1]],
            [self.b[0], self.a[1]],
            [self.b[0], self.b[1]],
            [self.a[0], self.b[1]],
        ]
    }

    /// Normalizes orientation back to an axis-aligned rectangle.
    pub fn bounds(&self) -> Rect {
        let x = self.a[0].min(self.b[0]);
        let y = self.a[1].min(self.b[1]);

        Rect::new(
            x,
            y,
            self.a[0].max(self.b[0]) - x,
            self.a[1].max(self.b[1]) - y,
        )
    }
}

/// True when both sides are powers of two.
pub fn is_size_power_of_two(width: u32, height: u32) -> bool {
    width.is_power_of_two() && height.is_power_of_two()
}
