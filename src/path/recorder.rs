// MIT/Apache2 License

//! The primitive recorder: `move_to`/`line_to`/`poly_line_to`/
//! `poly_bezier_to`/`close_figure`, plus the "ensure stroke start" rule that
//! decides when an implicit `MOVE` has to be inserted.

use super::{PathBuffer, PointKind};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::transform::Transform;

/// A path being actively recorded: the buffer plus the auxiliary cursor and
/// new-stroke state.
#[derive(Debug, Clone)]
pub struct RecordingPath {
    buffer: PathBuffer,
    cursor: Point,
    new_stroke: bool,
}

impl RecordingPath {
    /// Begin recording a new, empty path with the cursor seeded from the
    /// device context's current position.
    pub fn new(cursor: Point) -> Result<Self> {
        Ok(RecordingPath {
            buffer: PathBuffer::new()?,
            cursor,
            new_stroke: true,
        })
    }

    #[inline]
    pub fn buffer(&self) -> &PathBuffer {
        &self.buffer
    }

    #[inline]
    pub(crate) fn buffer_mut(&mut self) -> &mut PathBuffer {
        &mut self.buffer
    }

    #[inline]
    pub fn into_buffer(self) -> PathBuffer {
        self.buffer
    }

    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[inline]
    pub(crate) fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    #[inline]
    pub(crate) fn set_new_stroke(&mut self, new_stroke: bool) {
        self.new_stroke = new_stroke;
    }

    /// `move_to`: sets the cursor and flags the next append as the
    /// start of a new stroke. Appends nothing.
    pub fn move_to(&mut self, transform: &Transform, x: f64, y: f64) {
        self.cursor = transform.to_device(x, y);
        self.new_stroke = true;
    }

    /// Ensure-stroke-start: if the last entry continues naturally
    /// into the cursor (same stroke, not just closed), do nothing;
    /// otherwise append an explicit `MOVE` at the cursor.
    /// Public-within-crate hook so the shape constructors (e.g. `ArcTo`)
    /// can trigger the same rule before they append their own entries.
    pub(crate) fn ensure_stroke_start_pub(&mut self) -> Result<()> {
        self.ensure_stroke_start()
    }

    fn ensure_stroke_start(&mut self) -> Result<()> {
        let continues = !self.new_stroke
            && self
                .buffer
                .last_kind()
                .map_or(false, |k| !k.is_close_figure())
            && self.buffer.last_point() == Some(self.cursor);
        if continues {
            return Ok(());
        }
        self.buffer.add_points_device(&[self.cursor], PointKind::MOVE)?;
        self.new_stroke = false;
        Ok(())
    }

    /// `line_to`.
    pub fn line_to(&mut self, transform: &Transform, x: f64, y: f64) -> Result<()> {
        self.ensure_stroke_start()?;
        let device = transform.to_device(x, y);
        self.buffer.add_points_device(&[device], PointKind::LINE)?;
        self.cursor = device;
        Ok(())
    }

    /// `poly_line_to`: batched `line_to`.
    pub fn poly_line_to(&mut self, transform: &Transform, points: &[(f64, f64)]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        self.ensure_stroke_start()?;
        let device: Vec<Point> = points.iter().map(|&(x, y)| transform.to_device(x, y)).collect();
        self.buffer.add_points_device(&device, PointKind::LINE)?;
        self.cursor = *device.last().expect("checked non-empty above");
        Ok(())
    }

    /// `poly_bezier_to`: `points.len()` must be a multiple of three.
    pub fn poly_bezier_to(&mut self, transform: &Transform, points: &[(f64, f64)]) -> Result<()> {
        if points.is_empty() || points.len() % 3 != 0 {
            return Err(Error::CannotComplete);
        }
        self.ensure_stroke_start()?;
        let device: Vec<Point> = points.iter().map(|&(x, y)| transform.to_device(x, y)).collect();
        self.buffer.add_points_device(&device, PointKind::BEZIER)?;
        self.cursor = *device.last().expect("checked non-empty above");
        Ok(())
    }

    /// `close_figure`: no-op on an empty path.
    pub fn close_figure(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let last = self.buffer.len() - 1;
        self.buffer.set_close_figure(last);
        self.new_stroke = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::path::Primary;

    fn entries(path: &RecordingPath) -> Vec<(Point, Primary, bool)> {
        path.buffer()
            .iter()
            .map(|(p, k)| (p, k.primary(), k.is_close_figure()))
            .collect()
    }

    #[test]
    fn move_to_appends_nothing() {
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        path.move_to(&Transform::IDENTITY, 3.0, 4.0);
        assert!(path.buffer().is_empty());
        assert_eq!(path.cursor(), Point::new(3, 4));
    }

    #[test]
    fn consecutive_lines_share_one_stroke() {
        // S2: move_to(0,0); line_to(5,0); line_to(5,5); close_figure.
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        path.move_to(&Transform::IDENTITY, 0.0, 0.0);
        path.line_to(&Transform::IDENTITY, 5.0, 0.0).unwrap();
        path.line_to(&Transform::IDENTITY, 5.0, 5.0).unwrap();
        path.close_figure();

        let want = vec![
            (Point::new(0, 0), Primary::Move, false),
            (Point::new(5, 0), Primary::Line, false),
            (Point::new(5, 5), Primary::Line, true),
        ];
        assert_eq!(entries(&path), want);
    }

    #[test]
    fn line_to_after_close_figure_reopens_a_stroke() {
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        path.line_to(&Transform::IDENTITY, 1.0, 1.0).unwrap();
        path.close_figure();
        path.line_to(&Transform::IDENTITY, 2.0, 2.0).unwrap();

        let kinds: Vec<Primary> = entries(&path).into_iter().map(|(_, k, _)| k).collect();
        assert_eq!(kinds, vec![Primary::Move, Primary::Line, Primary::Move, Primary::Line]);
    }

    #[test]
    fn poly_bezier_to_requires_multiple_of_three() {
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        let err = path
            .poly_bezier_to(&Transform::IDENTITY, &[(1.0, 1.0), (2.0, 2.0)])
            .unwrap_err();
        assert_eq!(err, Error::CannotComplete);
    }

    #[test]
    fn close_figure_on_empty_path_is_a_no_op() {
        let mut path = RecordingPath::new(Point::new(0, 0)).unwrap();
        path.close_figure();
        assert!(path.buffer().is_empty());
    }
}
