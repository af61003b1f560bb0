// MIT/Apache2 License

//! Shape constructors: rectangles, round-rectangles, arcs (and the
//! chord/pie/ellipse/arc-to variants built on the same quadrant-Bézier
//! core), polylines, polygons, poly-poly variants, and `PolyDraw`.
//!
//! All constructors convert their logical-space inputs to device space
//! first, the same way the recorder does.

use super::recorder::RecordingPath;
use super::{Primary, PointKind};
use crate::error::{Error, Result};
use crate::geometry::{quadrant_bezier, Angle, Point, Rect, RectF};
use crate::mode::{ArcDirection, GraphicsMode};
use crate::transform::Transform;

/// Which terminal shape the quadrant-Bézier arc primitive should build
///: a bare arc, a chord (closed with a straight line), a pie
/// slice (closed through the box center), or an `ArcTo` that joins onto the
/// current stroke.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArcLines {
    Arc,
    Chord,
    Pie,
    ArcTo,
}

/// `Rectangle(x1, y1, x2, y2)`.
pub fn rectangle(
    path: &mut RecordingPath,
    transform: &Transform,
    mode: GraphicsMode,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
) -> Result<()> {
    let p1 = transform.to_device(x1, y1);
    let p2 = transform.to_device(x2, y2);
    let mut rect = Rect {
        x1: p1.x,
        y1: p1.y,
        x2: p2.x,
        y2: p2.y,
    }
    .canonicalized();
    if mode == GraphicsMode::Compatible {
        rect.x2 -= 1;
        rect.y2 -= 1;
    }

    let points = [
        Point::new(rect.x2, rect.y1), // top-right
        Point::new(rect.x1, rect.y1), // top-left
        Point::new(rect.x1, rect.y2), // bottom-left
        Point::new(rect.x2, rect.y2), // bottom-right
    ];
    let start = path.buffer_mut().add_points_device(&points, PointKind::LINE)?;
    path.buffer_mut().patch_kind(start, PointKind::MOVE);
    path.buffer_mut().set_close_figure(start + 3);
    path.set_cursor(points[3]);
    path.set_new_stroke(true);
    Ok(())
}

fn quarter_ellipse_points(rect: Rect, start: Angle, end: Angle) -> (Point, [Point; 3]) {
    let box_f = RectF {
        x1: rect.x1 as f32,
        y1: rect.y1 as f32,
        x2: rect.x2 as f32,
        y2: rect.y2 as f32,
    };
    let cb = quadrant_bezier(start, end);
    (
        box_f.denormalize(cb.p0).to_round(),
        [
            box_f.denormalize(cb.p1).to_round(),
            box_f.denormalize(cb.p2).to_round(),
            box_f.denormalize(cb.p3).to_round(),
        ],
    )
}

/// `RoundRect(x1, y1, x2, y2, ew, eh)`.
#[allow(clippy::too_many_arguments)]
pub fn round_rect(
    path: &mut RecordingPath,
    transform: &Transform,
    mode: GraphicsMode,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    ew: f64,
    eh: f64,
) -> Result<()> {
    let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };

    let p1 = transform.to_device(x1, y1);
    let p2 = transform.to_device(x2, y2);
    let mut rect = Rect {
        x1: p1.x,
        y1: p1.y,
        x2: p2.x,
        y2: p2.y,
    }
    .canonicalized();
    if mode == GraphicsMode::Compatible {
        rect.x2 -= 1;
        rect.y2 -= 1;
    }

    let ew_dev = (transform.to_device(x1 + ew, y1).x - p1.x).abs();
    let eh_dev = (transform.to_device(x1, y1 + eh).y - p1.y).abs();
    let rx = (ew_dev / 2).clamp(0, (rect.x2 - rect.x1) / 2);
    let ry = (eh_dev / 2).clamp(0, (rect.y2 - rect.y1) / 2);

    let top_right = Rect {
        x1: rect.x2 - 2 * rx,
        y1: rect.y1,
        x2: rect.x2,
        y2: rect.y1 + 2 * ry,
    };
    let top_left = Rect {
        x1: rect.x1,
        y1: rect.y1,
        x2: rect.x1 + 2 * rx,
        y2: rect.y1 + 2 * ry,
    };
    let bottom_left = Rect {
        x1: rect.x1,
        y1: rect.y2 - 2 * ry,
        x2: rect.x1 + 2 * rx,
        y2: rect.y2,
    };
    let bottom_right = Rect {
        x1: rect.x2 - 2 * rx,
        y1: rect.y2 - 2 * ry,
        x2: rect.x2,
        y2: rect.y2,
    };

    let quarter = std::f32::consts::FRAC_PI_2;
    let zero = Angle::from_radians(0.0).expect("0.0 is not NaN");
    // Walk clockwise (in normalized-angle terms) around the four corners,
    // starting from the mid-point of the right edge: top-right, top-left,
    // bottom-left, bottom-right, each one quarter turn further.
    let corners = [
        (top_right, zero, zero.sub(quarter)),
        (top_left, zero.sub(quarter), zero.sub(2.0 * quarter)),
        (bottom_left, zero.sub(2.0 * quarter), zero.sub(3.0 * quarter)),
        (bottom_right, zero.sub(3.0 * quarter), zero.sub(4.0 * quarter)),
    ];

    let (start_point, _) = quarter_ellipse_points(corners[0].0, corners[0].1, corners[0].2);
    path.buffer_mut().add_points_device(&[start_point], PointKind::MOVE)?;

    for (i, &(corner_box, a, b)) in corners.iter().enumerate() {
        let (p0, rest) = quarter_ellipse_points(corner_box, a, b);
        if i > 0 {
            path.buffer_mut().add_points_device(&[p0], PointKind::LINE)?;
        }
        path.buffer_mut().add_points_device(&rest, PointKind::BEZIER)?;
    }

    let last = path.buffer().len() - 1;
    path.buffer_mut().set_close_figure(last);
    path.set_cursor(start_point);
    path.set_new_stroke(true);
    Ok(())
}

/// The quadrant-Bézier arc primitive underlying arc/arc-to/chord/pie/ellipse
///. `bbox` and the start/end ray endpoints are in logical space.
#[allow(clippy::too_many_arguments)]
pub fn arc(
    path: &mut RecordingPath,
    transform: &Transform,
    mode: GraphicsMode,
    direction: ArcDirection,
    bbox: (f64, f64, f64, f64),
    start_ray: (f64, f64),
    end_ray: (f64, f64),
    lines: ArcLines,
) -> Result<()> {
    let (bx1, by1, bx2, by2) = bbox;
    let p1 = transform.to_device_f(bx1, by1);
    let p2 = transform.to_device_f(bx2, by2);
    let start_f = transform.to_device_f(start_ray.0, start_ray.1);
    let end_f = transform.to_device_f(end_ray.0, end_ray.1);

    let norm_box = RectF {
        x1: p1.x,
        y1: p1.y,
        x2: p2.x,
        y2: p2.y,
    }
    .canonicalized();

    let clockwise = direction.is_clockwise();
    let start_angle = Angle::from_atan2(
        norm_box.normalize(start_f).y,
        norm_box.normalize(start_f).x,
    );
    let end_angle_raw = Angle::from_atan2(norm_box.normalize(end_f).y, norm_box.normalize(end_f).x);
    let end_angle = end_angle_raw.normalize_sweep(start_angle, clockwise);

    let mut draw_box = norm_box;
    if mode == GraphicsMode::Compatible {
        draw_box.x2 -= 1.0;
        draw_box.y2 -= 1.0;
    }

    if lines == ArcLines::ArcTo {
        path.ensure_stroke_start_pub()?;
    }

    let total_sweep = end_angle.radians() - start_angle.radians();
    let sign: f32 = if clockwise { 1.0 } else { -1.0 };
    let quarter = std::f32::consts::FRAC_PI_2;

    // Segment boundaries sit on absolute multiples of a quarter turn in
    // `norm_box`'s reference frame, not on chunks counted from wherever
    // the sweep happens to start: an 80deg..100deg sweep splits at the
    // 90deg line into two segments, the same as a 0deg..100deg sweep would.
    let mut segments: Vec<(Angle, Angle)> = Vec::new();
    if total_sweep.abs() > 1e-4 {
        let end_r = end_angle.radians();
        let mut cur = start_angle;
        loop {
            let cur_r = cur.radians();
            let next_r = if sign > 0.0 {
                if cur_r >= end_r - 1e-4 {
                    break;
                }
                let boundary = ((cur_r / quarter - 1e-4).floor() + 1.0) * quarter;
                boundary.min(end_r)
            } else {
                if cur_r <= end_r + 1e-4 {
                    break;
                }
                let boundary = ((cur_r / quarter + 1e-4).ceil() - 1.0) * quarter;
                boundary.max(end_r)
            };
            let next = Angle::from_radians(next_r).expect("finite angle");
            segments.push((cur, next));
            cur = next;
        }
    }

    let start_point = draw_box.denormalize(start_f_norm(start_angle)).to_round();
    if lines == ArcLines::ArcTo {
        path.buffer_mut().add_points_device(&[start_point], PointKind::LINE)?;
    } else {
        path.buffer_mut().add_points_device(&[start_point], PointKind::MOVE)?;
    }

    let mut last_point = start_point;
    for (seg_start, seg_end) in &segments {
        let cb = quadrant_bezier(*seg_start, *seg_end);
        let p1 = draw_box.denormalize(cb.p1).to_round();
        let p2 = draw_box.denormalize(cb.p2).to_round();
        let p3 = draw_box.denormalize(cb.p3).to_round();
        path.buffer_mut().add_points_device(&[p1, p2, p3], PointKind::BEZIER)?;
        last_point = p3;
    }

    match lines {
        ArcLines::ArcTo => {
            path.set_cursor(last_point);
            path.set_new_stroke(false);
        }
        ArcLines::Arc => {}
        ArcLines::Chord => {
            let idx = path.buffer().len() - 1;
            path.buffer_mut().set_close_figure(idx);
        }
        ArcLines::Pie => {
            let center = draw_box.center().to_round();
            let idx = path.buffer_mut().add_points_device(&[center], PointKind::LINE)?;
            path.buffer_mut().set_close_figure(idx);
        }
    }
    Ok(())
}

#[inline]
fn start_f_norm(angle: Angle) -> crate::geometry::PointF {
    crate::geometry::PointF::new(angle.radians().cos(), angle.radians().sin())
}

/// `Ellipse(x1, y1, x2, y2)`: an arc whose start and end rays
/// coincide, closed as a chord.
pub fn ellipse(
    path: &mut RecordingPath,
    transform: &Transform,
    mode: GraphicsMode,
    direction: ArcDirection,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
) -> Result<()> {
    let mid_y = (y1 + y2) / 2.0;
    arc(
        path,
        transform,
        mode,
        direction,
        (x1, y1, x2, y2),
        (x1, mid_y),
        (x1, mid_y),
        ArcLines::Chord,
    )
}

/// `AngleArc(cx, cy, r, start, sweep)`: compute the endpoints from
/// the polar inputs and invoke the arc primitive in `ArcTo` mode.
pub fn angle_arc(
    path: &mut RecordingPath,
    transform: &Transform,
    mode: GraphicsMode,
    cx: f64,
    cy: f64,
    r: f64,
    start: f64,
    sweep: f64,
) -> Result<()> {
    let start_point = (cx + r * start.cos(), cy + r * start.sin());
    let end_point = (cx + r * (start + sweep).cos(), cy + r * (start + sweep).sin());
    let direction = if sweep >= 0.0 {
        ArcDirection::CounterClockwise
    } else {
        ArcDirection::Clockwise
    };
    arc(
        path,
        transform,
        mode,
        direction,
        (cx - r, cy - r, cx + r, cy + r),
        start_point,
        end_point,
        ArcLines::ArcTo,
    )
}

/// `Polyline(points)`. Fails on an empty point list.
pub fn poly_line(path: &mut RecordingPath, transform: &Transform, points: &[(f64, f64)]) -> Result<()> {
    if points.is_empty() {
        return Err(Error::CannotComplete);
    }
    let start = path.buffer_mut().add_points_logical(points, PointKind::LINE, transform)?;
    path.buffer_mut().patch_kind(start, PointKind::MOVE);
    Ok(())
}

/// `Polygon(points)`: a polyline whose last point is closed.
pub fn polygon(path: &mut RecordingPath, transform: &Transform, points: &[(f64, f64)]) -> Result<()> {
    poly_line(path, transform, points)?;
    let last = path.buffer().len() - 1;
    path.buffer_mut().set_close_figure(last);
    Ok(())
}

/// `PolyPolyline(sub_paths)`.
pub fn poly_polyline(
    path: &mut RecordingPath,
    transform: &Transform,
    sub_paths: &[Vec<(f64, f64)>],
) -> Result<()> {
    if sub_paths.is_empty() {
        return Err(Error::CannotComplete);
    }
    for points in sub_paths {
        poly_line(path, transform, points)?;
    }
    Ok(())
}

/// `PolyPolygon(sub_paths)`.
pub fn poly_polygon(
    path: &mut RecordingPath,
    transform: &Transform,
    sub_paths: &[Vec<(f64, f64)>],
) -> Result<()> {
    if sub_paths.is_empty() {
        return Err(Error::CannotComplete);
    }
    for points in sub_paths {
        polygon(path, transform, points)?;
    }
    Ok(())
}

/// `PolyDraw(points, types)`: a stateful walk over mixed
/// move/line/Bézier entries. Restores the pre-call cursor and fails on any
/// malformed pattern (a `BEZIER` type not in a run of three).
pub fn poly_draw(
    path: &mut RecordingPath,
    transform: &Transform,
    points: &[(f64, f64)],
    types: &[PointKind],
) -> Result<()> {
    if points.len() != types.len() || points.is_empty() {
        return Err(Error::CannotComplete);
    }
    let saved_cursor = path.cursor();
    let mut last_move = saved_cursor;
    let mut i = 0;
    while i < types.len() {
        match types[i].primary() {
            Primary::Move => {
                let device = transform.to_device(points[i].0, points[i].1);
                path.set_cursor(device);
                path.set_new_stroke(true);
                last_move = device;
                i += 1;
            }
            Primary::Line => {
                let (x, y) = points[i];
                if let Err(e) = path.line_to(transform, x, y) {
                    path.set_cursor(saved_cursor);
                    return Err(e);
                }
                if types[i].is_close_figure() {
                    let last = path.buffer().len() - 1;
                    path.buffer_mut().set_close_figure(last);
                    path.set_cursor(last_move);
                    path.set_new_stroke(true);
                }
                i += 1;
            }
            Primary::Bezier => {
                if i + 2 >= types.len() || !types[i + 1].is_bezier() || !types[i + 2].is_bezier() {
                    path.set_cursor(saved_cursor);
                    return Err(Error::CannotComplete);
                }
                let triple = [points[i], points[i + 1], points[i + 2]];
                if let Err(e) = path.poly_bezier_to(transform, &triple) {
                    path.set_cursor(saved_cursor);
                    return Err(e);
                }
                if types[i + 2].is_close_figure() {
                    let last = path.buffer().len() - 1;
                    path.buffer_mut().set_close_figure(last);
                    path.set_cursor(last_move);
                    path.set_new_stroke(true);
                }
                i += 3;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_path() -> RecordingPath {
        RecordingPath::new(Point::new(0, 0)).unwrap()
    }

    #[test]
    fn rectangle_produces_four_entries_in_gdi_corner_order() {
        // S1: rectangle(10,20,30,40), compatible mode off.
        let mut path = new_path();
        rectangle(&mut path, &Transform::IDENTITY, GraphicsMode::Advanced, 10.0, 20.0, 30.0, 40.0).unwrap();

        let got: Vec<_> = path.buffer().iter().collect();
        assert_eq!(got.len(), 4);
        assert_eq!(got[0].0, Point::new(30, 20));
        assert_eq!(got[1].0, Point::new(10, 20));
        assert_eq!(got[2].0, Point::new(10, 40));
        assert_eq!(got[3].0, Point::new(30, 40));
        assert_eq!(got[0].1.primary(), Primary::Move);
        assert_eq!(got[1].1.primary(), Primary::Line);
        assert_eq!(got[2].1.primary(), Primary::Line);
        assert_eq!(got[3].1.primary(), Primary::Line);
        assert!(got[3].1.is_close_figure());
    }

    #[test]
    fn rectangle_in_compatible_mode_shrinks_the_bottom_right_corner() {
        let mut path = new_path();
        rectangle(&mut path, &Transform::IDENTITY, GraphicsMode::Compatible, 10.0, 20.0, 30.0, 40.0).unwrap();
        let got: Vec<_> = path.buffer().iter().collect();
        assert_eq!(got[0].0, Point::new(29, 20));
        assert_eq!(got[3].0, Point::new(29, 39));
    }

    #[test]
    fn arc_quadrant_emits_one_leading_move_and_one_bezier_triple() {
        // S3: a single quadrant, counter-clockwise, no lines.
        let mut path = new_path();
        arc(
            &mut path,
            &Transform::IDENTITY,
            GraphicsMode::Advanced,
            ArcDirection::CounterClockwise,
            (0.0, 0.0, 100.0, 100.0),
            (100.0, 50.0),
            (50.0, 0.0),
            ArcLines::Arc,
        )
        .unwrap();

        let got: Vec<_> = path.buffer().iter().collect();
        assert_eq!(got.len(), 4);
        assert_eq!(got[0].1.primary(), Primary::Move);
        for entry in &got[1..] {
            assert_eq!(entry.1.primary(), Primary::Bezier);
        }
        assert!(!got.last().unwrap().1.is_close_figure());
    }

    #[test]
    fn chord_closes_the_figure_pie_appends_the_center() {
        let mut chord_path = new_path();
        arc(
            &mut chord_path,
            &Transform::IDENTITY,
            GraphicsMode::Advanced,
            ArcDirection::CounterClockwise,
            (0.0, 0.0, 100.0, 100.0),
            (100.0, 50.0),
            (50.0, 0.0),
            ArcLines::Chord,
        )
        .unwrap();
        assert!(chord_path.buffer().last_kind().unwrap().is_close_figure());

        let mut pie_path = new_path();
        arc(
            &mut pie_path,
            &Transform::IDENTITY,
            GraphicsMode::Advanced,
            ArcDirection::CounterClockwise,
            (0.0, 0.0, 100.0, 100.0),
            (100.0, 50.0),
            (50.0, 0.0),
            ArcLines::Pie,
        )
        .unwrap();
        let last = pie_path.buffer().last_point().unwrap();
        assert_eq!(last, Point::new(50, 50));
        assert!(pie_path.buffer().last_kind().unwrap().is_close_figure());
    }

    #[test]
    fn arc_splits_at_absolute_quadrant_boundaries_not_from_the_start_angle() {
        // An 80deg -> 100deg sweep must split at the 90deg line into two
        // bezier segments, not stay a single 20deg segment measured from 80deg.
        let mut path = new_path();
        let start = unsafe { Angle::from_degrees_unchecked(80.0) };
        let end = unsafe { Angle::from_degrees_unchecked(100.0) };
        let r = 100.0_f64;
        let start_ray = (r * (start.radians() as f64).cos(), r * (start.radians() as f64).sin());
        let end_ray = (r * (end.radians() as f64).cos(), r * (end.radians() as f64).sin());
        arc(
            &mut path,
            &Transform::IDENTITY,
            GraphicsMode::Advanced,
            ArcDirection::Clockwise,
            (-r, -r, r, r),
            start_ray,
            end_ray,
            ArcLines::Arc,
        )
        .unwrap();

        let got: Vec<_> = path.buffer().iter().collect();
        // One leading move, then two bezier triples (6 points) split at 90deg.
        assert_eq!(got.len(), 1 + 6);
        assert_eq!(got[0].1.primary(), Primary::Move);
        for entry in &got[1..] {
            assert_eq!(entry.1.primary(), Primary::Bezier);
        }
    }

    #[test]
    fn poly_line_rejects_an_empty_point_list() {
        let mut path = new_path();
        let err = poly_line(&mut path, &Transform::IDENTITY, &[]).unwrap_err();
        assert_eq!(err, Error::CannotComplete);
    }

    #[test]
    fn poly_draw_with_a_malformed_bezier_run_fails_and_restores_cursor() {
        // S5: move_to(0,0); polydraw([(1,1),(2,2)], [BEZIER, BEZIER]).
        let mut path = new_path();
        path.move_to(&Transform::IDENTITY, 0.0, 0.0);
        let ok = poly_draw(
            &mut path,
            &Transform::IDENTITY,
            &[(1.0, 1.0), (2.0, 2.0)],
            &[PointKind::BEZIER, PointKind::BEZIER],
        );
        assert!(ok.is_err());
        assert_eq!(path.cursor(), Point::new(0, 0));
    }

    #[test]
    fn poly_draw_closes_and_resets_cursor_to_the_last_move() {
        let mut path = new_path();
        let types = [
            PointKind::MOVE,
            PointKind::LINE,
            PointKind::LINE.with_close_figure(),
        ];
        poly_draw(
            &mut path,
            &Transform::IDENTITY,
            &[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)],
            &types,
        )
        .unwrap();
        assert_eq!(path.cursor(), Point::new(0, 0));
        assert!(path.buffer().last_kind().unwrap().is_close_figure());
    }
}
