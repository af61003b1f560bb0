// MIT/Apache2 License

//! Small geometry primitives shared by the path subsystem.
//!
//! Everything in the public path API is expressed in integer device-space
//! points ([`Point`]); the floating-point variants ([`PointF`], [`RectF`])
//! exist only for the intermediate math in arc and curve construction, where
//! rounding to the nearest integer has to happen as late as possible.

mod angle;
mod curve;

pub use angle::Angle;
pub use curve::{quadrant_bezier, subdivide_cubic, CubicBezier};

/// A point in integer device-space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    #[inline]
    pub(crate) fn to_f32(self) -> PointF {
        PointF {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

/// A point in floating-point device space, used only while building curves.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        PointF { x, y }
    }

    /// Round-to-nearest conversion back to an integer device point.
    #[inline]
    pub fn to_round(self) -> Point {
        Point {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }

    #[inline]
    pub(crate) fn add(self, other: PointF) -> PointF {
        PointF::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub(crate) fn sub(self, other: PointF) -> PointF {
        PointF::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub(crate) fn scale(self, k: f32) -> PointF {
        PointF::new(self.x * k, self.y * k)
    }
}

/// An axis-aligned rectangle in integer device space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Canonicalize so that `(x1, y1)` is the top-left corner and
    /// `(x2, y2)` is the bottom-right corner.
    #[inline]
    pub fn canonicalized(self) -> Rect {
        let (x1, x2) = if self.x1 <= self.x2 {
            (self.x1, self.x2)
        } else {
            (self.x2, self.x1)
        };
        let (y1, y2) = if self.y1 <= self.y2 {
            (self.y1, self.y2)
        } else {
            (self.y2, self.y1)
        };
        Rect { x1, y1, x2, y2 }
    }
}

/// An axis-aligned rectangle in floating-point device space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectF {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl RectF {
    #[inline]
    pub fn canonicalized(self) -> RectF {
        let (x1, x2) = if self.x1 <= self.x2 {
            (self.x1, self.x2)
        } else {
            (self.x2, self.x1)
        };
        let (y1, y2) = if self.y1 <= self.y2 {
            (self.y1, self.y2)
        } else {
            (self.y2, self.y1)
        };
        RectF { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn center(self) -> PointF {
        PointF::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    #[inline]
    pub fn half_size(self) -> PointF {
        PointF::new((self.x2 - self.x1) / 2.0, (self.y2 - self.y1) / 2.0)
    }

    /// Normalize a point relative to this box into `[-1, 1]^2`, the way
    /// the arc primitive needs before it can compute `atan2`.
    #[inline]
    pub fn normalize(self, p: PointF) -> PointF {
        let c = self.center();
        let h = self.half_size();
        PointF::new(
            if h.x != 0.0 { (p.x - c.x) / h.x } else { 0.0 },
            if h.y != 0.0 { (p.y - c.y) / h.y } else { 0.0 },
        )
    }

    /// Map a normalized `[-1, 1]^2` point back onto this box.
    #[inline]
    pub fn denormalize(self, p: PointF) -> PointF {
        let c = self.center();
        let h = self.half_size();
        PointF::new(c.x + h.x * p.x, c.y + h.y * p.y)
    }
}
