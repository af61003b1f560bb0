// MIT/Apache2 License

use crate::geometry::{Point, PointF};

/// The world-to-device affine transform a device context exposes. Only
/// consumed here, never constructed from a drawing primitive: the host
/// graphics library owns it.
///
/// Stored as the two rows of a 2x3 matrix, in the same column-major
/// convention `Surface::set_transform` documents:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Apply the logical -> device transform, rounding to the nearest
    /// integer device coordinate.
    #[inline]
    pub fn to_device(&self, x: f64, y: f64) -> Point {
        Point {
            x: (self.a * x + self.c * y + self.e).round() as i32,
            y: (self.b * x + self.d * y + self.f).round() as i32,
        }
    }

    /// Apply the logical -> device transform, keeping full floating-point
    /// precision. Used by the arc primitive, which has to normalize
    /// device-space coordinates before rounding can happen.
    #[inline]
    pub(crate) fn to_device_f(&self, x: f64, y: f64) -> PointF {
        PointF {
            x: (self.a * x + self.c * y + self.e) as f32,
            y: (self.b * x + self.d * y + self.f) as f32,
        }
    }

    /// Invert this transform, for the device -> logical direction `get_path`
    /// needs on readback. Returns `None` if the transform is singular.
    pub fn inverted(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let a = self.d * inv_det;
        let b = -self.b * inv_det;
        let c = -self.c * inv_det;
        let d = self.a * inv_det;
        let e = -(a * self.e + c * self.f);
        let f = -(b * self.e + d * self.f);
        Some(Transform { a, b, c, d, e, f })
    }

    /// Apply this transform (used as the device -> logical transform after
    /// inversion) to a device point.
    #[inline]
    pub fn to_logical(&self, p: Point) -> (f64, f64) {
        let x = p.x as f64;
        let y = p.y as f64;
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_through_device_and_logical() {
        let t = Transform::IDENTITY;
        let device = t.to_device(12.0, -4.0);
        assert_eq!(device, Point { x: 12, y: -4 });
        assert_eq!(t.to_logical(device), (12.0, -4.0));
    }

    #[test]
    fn inverted_undoes_a_scale_and_translate() {
        let t = Transform {
            a: 2.0,
            b: 0.0,
            c: 0.0,
            d: 2.0,
            e: 5.0,
            f: -3.0,
        };
        let device = t.to_device(10.0, 10.0);
        let inverse = t.inverted().unwrap();
        let (lx, ly) = inverse.to_logical(device);
        approx::assert_relative_eq!(lx, 10.0, epsilon = 1e-9);
        approx::assert_relative_eq!(ly, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn singular_transform_has_no_inverse() {
        let t = Transform {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        };
        assert!(t.inverted().is_none());
    }
}
