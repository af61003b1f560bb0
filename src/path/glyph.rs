// MIT/Apache2 License

//! Glyph outline expansion: each contour from the
//! external outline extractor becomes one closed figure, with quadratic (or
//! higher-order) spline runs expanded into cubic segments via the midpoint
//! construction.

use super::recorder::RecordingPath;
use super::PointKind;
use crate::error::{Error, Result};
use crate::geometry::Point;

/// A single curve within a glyph contour, already split by the outline
/// extractor into straight runs and spline runs.
#[derive(Debug, Clone)]
pub enum GlyphCurve {
    /// A run of on-curve points, each reached by a straight line.
    Line(Vec<(i32, i32)>),
    /// A spline run: zero or more off-curve control points followed by one
    /// true on-curve anchor. Expanded with the midpoint construction:
    /// for n=1 it's a single cubic directly (the control point and the true
    /// anchor), for n>1 each off-curve point but the last pairs with the
    /// midpoint of itself and its successor.
    Spline(Vec<(i32, i32)>),
}

/// Convert a 16.16 fixed-point coordinate to an integer device coordinate,
/// rounding half up toward positive infinity.
#[inline]
pub fn fixed_to_device(value: i32) -> i32 {
    let whole = value >> 16;
    let frac = value & 0xFFFF;
    if frac >= 0x8000 {
        whole + 1
    } else {
        whole
    }
}

#[inline]
fn fixed_point(x: i32, y: i32) -> Point {
    Point::new(fixed_to_device(x), fixed_to_device(y))
}

#[inline]
fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2, (a.y + b.y) / 2)
}

/// Degree-elevate a quadratic `(anchor, control, end)` to the cubic
/// `(control1, control2, end)` triple our path buffer stores.
#[inline]
fn quadratic_to_cubic(anchor: Point, control: Point, end: Point) -> [Point; 3] {
    let c1 = Point::new(
        anchor.x + (2 * (control.x - anchor.x)) / 3,
        anchor.y + (2 * (control.y - anchor.y)) / 3,
    );
    let c2 = Point::new(
        end.x + (2 * (control.x - end.x)) / 3,
        end.y + (2 * (control.y - end.y)) / 3,
    );
    [c1, c2, end]
}

/// Append one glyph contour: a `MOVE` to `start`, then each curve in turn,
/// closing the figure at the end.
pub fn append_contour(path: &mut RecordingPath, start: (i32, i32), curves: &[GlyphCurve]) -> Result<()> {
    let start_point = fixed_point(start.0, start.1);
    path.buffer_mut().add_points_device(&[start_point], PointKind::MOVE)?;
    path.set_cursor(start_point);
    path.set_new_stroke(false);

    let mut prev_anchor = start_point;
    for curve in curves {
        match curve {
            GlyphCurve::Line(points) => {
                let device: Vec<Point> = points.iter().map(|&(x, y)| fixed_point(x, y)).collect();
                if device.is_empty() {
                    continue;
                }
                path.buffer_mut().add_points_device(&device, PointKind::LINE)?;
                prev_anchor = *device.last().expect("checked non-empty above");
            }
            GlyphCurve::Spline(points) => {
                if points.is_empty() {
                    return Err(Error::CannotComplete);
                }
                let device: Vec<Point> = points.iter().map(|&(x, y)| fixed_point(x, y)).collect();
                let final_anchor = *device.last().expect("checked non-empty above");
                let controls = &device[..device.len() - 1];
                let mut out = Vec::with_capacity(controls.len() * 3);
                for (i, &control) in controls.iter().enumerate() {
                    let end = if i + 1 < controls.len() {
                        midpoint(control, controls[i + 1])
                    } else {
                        final_anchor
                    };
                    out.extend_from_slice(&quadratic_to_cubic(prev_anchor, control, end));
                    prev_anchor = end;
                }
                path.buffer_mut().add_points_device(&out, PointKind::BEZIER)?;
            }
        }
    }

    path.close_figure();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::path::recorder::RecordingPath;

    #[test]
    fn fixed_to_device_rounds_half_up() {
        assert_eq!(fixed_to_device(0x0000_7FFF), 0); // just under half: truncate
        assert_eq!(fixed_to_device(0x0000_8000), 1); // exactly half: round up
        assert_eq!(fixed_to_device(1 << 16), 1); // exactly 1.0
        assert_eq!(fixed_to_device((1 << 16) + 0x8000), 2); // 1.5 -> 2
    }

    #[test]
    fn a_line_contour_appends_a_leading_move_and_closes() {
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        append_contour(
            &mut path,
            (0, 0),
            &[GlyphCurve::Line(vec![(1 << 16, 0), (1 << 16, 1 << 16)])],
        )
        .unwrap();

        let entries: Vec<_> = path.buffer().iter().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, Point::new(0, 0));
        assert!(entries[0].1.is_move());
        assert_eq!(entries[2].0, Point::new(1, 1));
        assert!(entries.last().unwrap().1.is_close_figure());
    }

    #[test]
    fn a_two_point_spline_degenerates_to_one_cubic() {
        // n=2: one off-curve control point then the true anchor.
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        append_contour(
            &mut path,
            (0, 0),
            &[GlyphCurve::Spline(vec![(1 << 16, 1 << 16), (2 << 16, 0)])],
        )
        .unwrap();

        let entries: Vec<_> = path.buffer().iter().collect();
        // leading MOVE + exactly one cubic triple.
        assert_eq!(entries.len(), 4);
        assert!(entries[1].1.is_bezier());
        assert!(entries[2].1.is_bezier());
        assert!(entries[3].1.is_bezier());
    }

    #[test]
    fn an_empty_spline_run_fails() {
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        let err = append_contour(&mut path, (0, 0), &[GlyphCurve::Spline(vec![])]).unwrap_err();
        assert_eq!(err, Error::CannotComplete);
    }
}
