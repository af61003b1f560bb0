// MIT/Apache2 License

//! The widener: turns a flattened path into the closed polygon(s)
//! that outline a stroke of the current pen.
//!
//! Precondition: `source` has already been flattened (no `BEZIER` entries)
//! and, if non-empty, leads with `MOVE`; either violation fails with
//! [`Error::CannotComplete`], matching a cosmetic pen.

use tinyvec::TinyVec;

use super::{PathBuffer, PointKind};
use crate::error::{Error, Result};
use crate::geometry::{quadrant_bezier, Angle, Point, RectF};
use crate::pen::{CapStyle, JoinStyle, Pen};

/// Round caps and joins emit at most four quadrant-Bézier segments (twelve
/// points); inline storage avoids a heap allocation for the common case.
type RoundPoints = TinyVec<[(Point, PointKind); 12]>;

pub fn widen(source: &PathBuffer, pen: &Pen) -> Result<PathBuffer> {
    if pen.cosmetic {
        return Err(Error::CannotComplete);
    }
    for (_, kind) in source.iter() {
        if kind.is_bezier() {
            return Err(Error::CannotComplete);
        }
    }
    if let Some((_, first_kind)) = source.iter().next() {
        if !first_kind.is_move() {
            return Err(Error::CannotComplete);
        }
    }

    let (w_in, w_out) = pen.half_widths();
    let mut out = PathBuffer::empty();
    for (points, closed) in source.sub_paths() {
        widen_one(&mut out, &points, closed, pen, w_in, w_out)?;
    }
    Ok(out)
}

#[inline]
fn angle_of(a: Point, b: Point) -> f32 {
    ((b.y - a.y) as f32).atan2((b.x - a.x) as f32)
}

#[inline]
fn perp(theta: f32) -> (f32, f32) {
    (-theta.sin(), theta.cos())
}

#[inline]
fn offset_point(vertex: Point, theta: f32, sign: f32, dist: f32) -> Point {
    let (px, py) = perp(theta);
    Point::new(
        (vertex.x as f32 + px * sign * dist).round() as i32,
        (vertex.y as f32 + py * sign * dist).round() as i32,
    )
}

fn round_arc_points(center: Point, radius: f32, begin: f32, sweep: f32) -> RoundPoints {
    let box_ = RectF {
        x1: center.x as f32 - radius,
        y1: center.y as f32 - radius,
        x2: center.x as f32 + radius,
        y2: center.y as f32 + radius,
    };
    const STEPS: usize = 4;
    let step = sweep / STEPS as f32;
    let mut out = RoundPoints::new();
    let mut cur = begin;
    for _ in 0..STEPS {
        let next = cur + step;
        let a0 = Angle::from_radians(cur).unwrap_or(Angle::ZERO);
        let a1 = Angle::from_radians(next).unwrap_or(Angle::ZERO);
        let cb = quadrant_bezier(a0, a1);
        out.push((box_.denormalize(cb.p1).to_round(), PointKind::BEZIER));
        out.push((box_.denormalize(cb.p2).to_round(), PointKind::BEZIER));
        out.push((box_.denormalize(cb.p3).to_round(), PointKind::BEZIER));
        cur = next;
    }
    out
}

fn emit_cap(up: &mut Vec<(Point, PointKind)>, vertex: Point, theta: f32, is_start: bool, pen: &Pen, w_in: i32, w_out: i32) {
    match pen.cap {
        CapStyle::Flat => {
            let (a, b) = if is_start {
                (
                    offset_point(vertex, theta, -1.0, w_in as f32),
                    offset_point(vertex, theta, 1.0, w_out as f32),
                )
            } else {
                (
                    offset_point(vertex, theta, 1.0, w_out as f32),
                    offset_point(vertex, theta, -1.0, w_in as f32),
                )
            };
            up.push((a, PointKind::LINE));
            up.push((b, PointKind::LINE));
        }
        CapStyle::Square => {
            let w = pen.width as f32;
            let sq2 = std::f32::consts::SQRT_2;
            // a square cap extends the stroke by `w` past the endpoint, the
            // two corner points sitting diagonally at theta +/- pi/4 from
            // the outward travel direction (reversed for the start cap).
            let base = if is_start {
                theta + std::f32::consts::PI
            } else {
                theta
            };
            let p1 = Point::new(
                (vertex.x as f32 + sq2 * w * (base + std::f32::consts::FRAC_PI_4).cos()).round() as i32,
                (vertex.y as f32 + sq2 * w * (base + std::f32::consts::FRAC_PI_4).sin()).round() as i32,
            );
            let p2 = Point::new(
                (vertex.x as f32 + sq2 * w * (base - std::f32::consts::FRAC_PI_4).cos()).round() as i32,
                (vertex.y as f32 + sq2 * w * (base - std::f32::consts::FRAC_PI_4).sin()).round() as i32,
            );
            if is_start {
                up.push((p2, PointKind::LINE));
                up.push((p1, PointKind::LINE));
            } else {
                up.push((p1, PointKind::LINE));
                up.push((p2, PointKind::LINE));
            }
        }
        CapStyle::Round => {
            let radius = (w_in + w_out) as f32 / 2.0;
            let base = if is_start {
                theta + std::f32::consts::PI
            } else {
                theta
            };
            let begin = base - std::f32::consts::FRAC_PI_2;
            up.extend(round_arc_points(vertex, radius, begin, std::f32::consts::PI));
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_interior(
    up: &mut Vec<(Point, PointKind)>,
    down: &mut Vec<(Point, PointKind)>,
    vertex: Point,
    theta_in: f32,
    theta_out: f32,
    alpha: f32,
    pen: &Pen,
    w_in: i32,
    w_out: i32,
) {
    let inside_sign = if alpha > 0.0 { 1.0 } else { -1.0 };
    let (inside, outside) = if alpha > 0.0 { (&mut *up, &mut *down) } else { (&mut *down, &mut *up) };

    inside.push((offset_point(vertex, theta_in, inside_sign, w_in as f32), PointKind::LINE));
    inside.push((offset_point(vertex, theta_out, inside_sign, w_in as f32), PointKind::LINE));

    let outside_sign = -inside_sign;
    match pen.join {
        JoinStyle::Miter => {
            let half = alpha.abs() / 2.0;
            let denom = (std::f32::consts::FRAC_PI_2 - half).cos();
            let dist = if !approx::abs_diff_eq!(denom, 0.0, epsilon = 1e-4) {
                (w_out as f32 / denom).abs()
            } else {
                f32::MAX
            };
            if dist > pen.miter_limit * w_out as f32 {
                outside.push((offset_point(vertex, theta_in, outside_sign, w_out as f32), PointKind::LINE));
                outside.push((offset_point(vertex, theta_out, outside_sign, w_out as f32), PointKind::LINE));
            } else {
                let bisector = theta_in + alpha / 2.0;
                outside.push((offset_point(vertex, bisector, outside_sign, dist), PointKind::LINE));
            }
        }
        JoinStyle::Bevel => {
            outside.push((offset_point(vertex, theta_in, outside_sign, w_out as f32), PointKind::LINE));
            outside.push((offset_point(vertex, theta_out, outside_sign, w_out as f32), PointKind::LINE));
        }
        JoinStyle::Round => {
            let start_angle = theta_in + outside_sign * std::f32::consts::FRAC_PI_2;
            let end_angle = theta_out + outside_sign * std::f32::consts::FRAC_PI_2;
            let a0 = Angle::from_radians(start_angle).unwrap_or(Angle::ZERO);
            let a1 = Angle::from_radians(end_angle).unwrap_or(Angle::ZERO);
            let cb = quadrant_bezier(a0, a1);
            let box_ = RectF {
                x1: vertex.x as f32 - w_out as f32,
                y1: vertex.y as f32 - w_out as f32,
                x2: vertex.x as f32 + w_out as f32,
                y2: vertex.y as f32 + w_out as f32,
            };
            outside.push((box_.denormalize(cb.p1).to_round(), PointKind::BEZIER));
            outside.push((box_.denormalize(cb.p2).to_round(), PointKind::BEZIER));
            outside.push((box_.denormalize(cb.p3).to_round(), PointKind::BEZIER));
        }
    }
}

fn widen_one(out: &mut PathBuffer, points: &[Point], closed: bool, pen: &Pen, w_in: i32, w_out: i32) -> Result<()> {
    let n = points.len();
    if n < 2 {
        return Ok(());
    }

    let mut up: Vec<(Point, PointKind)> = Vec::new();
    let mut down: Vec<(Point, PointKind)> = Vec::new();

    for j in 0..n {
        let is_endpoint = !closed && (j == 0 || j == n - 1);
        if is_endpoint {
            let theta = if j == 0 {
                angle_of(points[0], points[1])
            } else {
                angle_of(points[n - 2], points[n - 1])
            };
            emit_cap(&mut up, points[j], theta, j == 0, pen, w_in, w_out);
        } else {
            let prev = points[(j + n - 1) % n];
            let next = points[(j + 1) % n];
            let theta_in = angle_of(prev, points[j]);
            let theta_out = angle_of(points[j], next);
            let mut alpha = theta_out - theta_in;
            while alpha > std::f32::consts::PI {
                alpha -= std::f32::consts::TAU;
            }
            while alpha <= -std::f32::consts::PI {
                alpha += std::f32::consts::TAU;
            }
            if approx::abs_diff_eq!(alpha, 0.0) {
                continue;
            }
            emit_interior(&mut up, &mut down, points[j], theta_in, theta_out, alpha, pen, w_in, w_out);
        }
    }

    if up.is_empty() {
        return Ok(());
    }

    let up_points: Vec<Point> = up.iter().map(|&(p, _)| p).collect();
    let up_start = out.add_points_device(&up_points, PointKind::LINE)?;
    out.patch_kind(up_start, PointKind::MOVE);
    for (offset, &(_, kind)) in up.iter().enumerate().skip(1) {
        if kind.is_bezier() {
            out.patch_kind(up_start + offset, PointKind::BEZIER);
        }
    }

    if !down.is_empty() {
        let mut reversed = down.clone();
        reversed.reverse();
        let down_points: Vec<Point> = reversed.iter().map(|&(p, _)| p).collect();
        let down_start = out.add_points_device(&down_points, PointKind::LINE)?;
        for (offset, &(_, kind)) in reversed.iter().enumerate() {
            if kind.is_bezier() {
                out.patch_kind(down_start + offset, PointKind::BEZIER);
            }
        }
        if !closed {
            out.patch_kind(down_start, PointKind::MOVE);
        }
    }

    let last = out.len() - 1;
    out.set_close_figure(last);
    Ok(())
}
