use super::Vec2;

/// An axis-aligned rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Vec2,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Vec2 { x, y },
            w,
            h,
        }
    }

    /// Construct a rectangle from a position and a size vector.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            tl: pos,
            w: size.x,
            h: size.y,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The size of this rectangle as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// The bottom-right corner.
    pub fn br(&self) -> Vec2 {
        Vec2::new(self.tl.x + self.w, self.tl.y + self.h)
    }

    /// The center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.tl.x + self.w / 2.0, self.tl.y + self.h / 2.0)
    }

    /// Does this rectangle contain the point? Edges are inclusive on all four
    /// sides, so a pointer resting on the border counts as inside.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.tl.x && p.x <= self.tl.x + self.w && p.y >= self.tl.y && p.y <= self.tl.y + self.h
    }

    /// Does this rectangle completely enclose the other?
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.contains_point(other.tl) && self.contains_point(other.br())
    }

    /// Move the rectangle by an offset.
    pub fn shift(&self, by: Vec2) -> Self {
        Self {
            tl: self.tl + by,
            w: self.w,
            h: self.h,
        }
    }

    /// Shrink the rectangle by `inset` on every side. The result may have a
    /// negative size if the inset is larger than half the rectangle.
    pub fn inset(&self, inset: Vec2) -> Self {
        Self {
            tl: self.tl + inset,
            w: self.w - inset.x * 2.0,
            h: self.h - inset.y * 2.0,
        }
    }

    /// Grow the rectangle by `outset` on every side.
    pub fn outset(&self, outset: Vec2) -> Self {
        self.inset(-outset)
    }

    /// The smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Self) -> Self {
        let tl = self.tl.min(other.tl);
        let br = self.br().max(other.br());
        Self::from_pos_size(tl, br - tl)
    }
}
