// MIT/Apache2 License

use super::{Angle, Point, PointF};

/// A cubic Bézier curve with four control points, in floating-point device
/// space. Used both to build quadrant arcs and to approximate
/// round caps/joins while widening.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier {
    pub p0: PointF,
    pub p1: PointF,
    pub p2: PointF,
    pub p3: PointF,
}

impl CubicBezier {
    #[inline]
    fn eval_at(&self, t: f32) -> PointF {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;
        let x = (self.p0.x * mt3) + (3.0 * self.p1.x * mt2 * t) + (3.0 * self.p2.x * mt * t2)
            + (self.p3.x * t3);
        let y = (self.p0.y * mt3) + (3.0 * self.p1.y * mt2 * t) + (3.0 * self.p2.y * mt * t2)
            + (self.p3.y * t3);
        PointF::new(x, y)
    }

    /// Heuristic segment count for adaptive subdivision: proportional to
    /// the length of the control polygon, the way a chord-length flattening
    /// tolerance would scale with curve size.
    #[inline]
    fn num_segments(&self) -> usize {
        let approx_length = dist(self.p0, self.p1) + dist(self.p1, self.p2) + dist(self.p2, self.p3);
        (((approx_length.powi(2) + 800.0).sqrt() / 8.0) as usize).max(1)
    }

    /// Interpolate `n >= 2` points along the curve, from `p0` (exclusive)
    /// through `p3` (inclusive), rounded to integer device coordinates.
    ///
    /// Given four control points, returns an array of at least two points
    /// along the curve.
    pub fn flatten_to_points(&self) -> Vec<Point> {
        let segments = self.num_segments().max(1);
        let interval = 1.0 / (segments as f32);
        (1..=segments)
            .map(|i| self.eval_at(i as f32 * interval).to_round())
            .collect()
    }
}

#[inline]
fn dist(a: PointF, b: PointF) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Flatten one cubic Bézier triple (anchor `p0`, controls `p1`/`p2`, end
/// `p3`, all in integer device space) into a run of line-segment endpoints.
/// Always returns at least two points (the curve's own endpoint, at a
/// minimum), matching `flatten(flatten(p)) == flatten(p)` idempotence when
/// fed back through the flattener.
pub fn subdivide_cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<Point> {
    CubicBezier {
        p0: p0.to_f32(),
        p1: p1.to_f32(),
        p2: p2.to_f32(),
        p3: p3.to_f32(),
    }
    .flatten_to_points()
}

/// Build the cubic Bézier that approximates one quadrant-or-smaller arc of
/// the unit circle from `start` to `end` (`|end - start| <= pi/2`), in
/// normalized `[-1, 1]^2` space.
pub fn quadrant_bezier(start: Angle, end: Angle) -> CubicBezier {
    let (sin_a, cos_a) = (start.radians().sin(), start.radians().cos());
    let (sin_b, cos_b) = (end.radians().sin(), end.radians().cos());

    let half_sweep = (end.radians() - start.radians()) / 2.0;
    let a = if !approx::abs_diff_eq!(half_sweep, 0.0) {
        (4.0 / 3.0) * (1.0 - half_sweep.cos()) / half_sweep.sin()
    } else {
        0.0
    };

    let p0 = PointF::new(cos_a, sin_a);
    let p3 = PointF::new(cos_b, sin_b);
    let p1 = p0.add(PointF::new(-sin_a, cos_a).scale(a));
    let p2 = p3.add(PointF::new(sin_b, -cos_b).scale(a));

    CubicBezier { p0, p1, p2, p3 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_bezier_endpoints_sit_on_the_unit_circle() {
        let cb = quadrant_bezier(Angle::ZERO, Angle::QUARTER_CIRCLE);
        approx::assert_relative_eq!(cb.p0.x, 1.0, epsilon = 1e-5);
        approx::assert_relative_eq!(cb.p0.y, 0.0, epsilon = 1e-5);
        approx::assert_relative_eq!(cb.p3.x, 0.0, epsilon = 1e-5);
        approx::assert_relative_eq!(cb.p3.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_zero_sweep_collapses_all_controls() {
        let cb = quadrant_bezier(Angle::ZERO, Angle::ZERO);
        assert_eq!(cb.p0, cb.p1);
        assert_eq!(cb.p1, cb.p2);
        assert_eq!(cb.p2, cb.p3);
    }

    #[test]
    fn subdivide_cubic_always_returns_at_least_two_points_ending_at_p3() {
        let pts = subdivide_cubic(
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
        );
        assert!(pts.len() >= 2);
        assert_eq!(*pts.last().unwrap(), Point::new(10, 0));
    }
}
