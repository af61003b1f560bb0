// MIT/Apache2 License

//! The flattener: replaces every Bézier run with its polyline
//! approximation, leaving `MOVE`/`LINE` entries untouched.

use super::{PathBuffer, PointKind};
use crate::error::Result;
use crate::geometry::subdivide_cubic;

/// Produce a new path containing only `MOVE`/`LINE` entries, preserving
/// `CLOSE_FIGURE` bits. A path that's already flat is copied through
/// unchanged, which is what makes `flatten` idempotent.
pub fn flatten(source: &PathBuffer) -> Result<PathBuffer> {
    let mut out = PathBuffer::empty();
    let entries: Vec<_> = source.iter().collect();
    let mut i = 0;
    let mut anchor = entries.first().map(|&(p, _)| p);

    while i < entries.len() {
        let (point, kind) = entries[i];
        if kind.is_bezier() {
            let p0 = anchor.expect("a BEZIER run must be preceded by an anchor point");
            let p1 = point;
            let (p2, _) = entries[i + 1];
            let (p3, k3) = entries[i + 2];
            let flattened = subdivide_cubic(p0, p1, p2, p3);
            let start = out.add_points_device(&flattened, PointKind::LINE)?;
            if k3.is_close_figure() {
                out.set_close_figure(start + flattened.len() - 1);
            }
            anchor = Some(p3);
            i += 3;
        } else {
            out.add_points_device(&[point], kind)?;
            anchor = Some(point);
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn flattening_a_line_only_path_is_the_identity() {
        let mut buf = PathBuffer::new().unwrap();
        let start = buf
            .add_points_device(&[pt(0, 0), pt(10, 0), pt(10, 10)], PointKind::LINE)
            .unwrap();
        buf.patch_kind(start, PointKind::MOVE);
        buf.set_close_figure(buf.len() - 1);

        let flat = flatten(&buf).unwrap();
        let original: Vec<_> = buf.iter().collect();
        let flattened: Vec<_> = flat.iter().collect();
        assert_eq!(original, flattened);
    }

    #[test]
    fn flatten_is_idempotent_on_a_curved_path() {
        let mut buf = PathBuffer::new().unwrap();
        let start = buf.add_points_device(&[pt(0, 0)], PointKind::LINE).unwrap();
        buf.patch_kind(start, PointKind::MOVE);
        let bez_start = buf
            .add_points_device(&[pt(0, 10), pt(10, 10), pt(10, 0)], PointKind::BEZIER)
            .unwrap();
        buf.set_close_figure(bez_start + 2);

        let once = flatten(&buf).unwrap();
        let twice = flatten(&once).unwrap();
        let once_pts: Vec<_> = once.iter().collect();
        let twice_pts: Vec<_> = twice.iter().collect();
        assert_eq!(once_pts, twice_pts);
        assert!(once.iter().all(|(_, k)| !k.is_bezier()));
    }

    #[test]
    fn flatten_preserves_close_figure_on_the_last_flattened_point() {
        let mut buf = PathBuffer::new().unwrap();
        let start = buf.add_points_device(&[pt(0, 0)], PointKind::LINE).unwrap();
        buf.patch_kind(start, PointKind::MOVE);
        let bez_start = buf
            .add_points_device(&[pt(0, 10), pt(10, 10), pt(10, 0)], PointKind::BEZIER)
            .unwrap();
        buf.set_close_figure(bez_start + 2);

        let flat = flatten(&buf).unwrap();
        assert!(flat.last_kind().unwrap().is_close_figure());
        assert!(flat.check_invariants());
    }
}
