// MIT/Apache2 License

//! The driver façade: the device-context-facing surface that decides
//! whether a geometric primitive gets recorded into an open path or passed
//! straight through, and that implements the terminal path operations.
//!
//! Rather than an inheritance hierarchy, drawing dispatch is a small
//! capability switch between two states ("recording", "passthrough"). Here
//! that state is one optional frame deep, since only one path can be open on
//! a device context at a time.

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::mode::{ArcDirection, GraphicsMode, PolyFillMode};
use crate::path::glyph::GlyphCurve;
use crate::path::recorder::RecordingPath;
use crate::path::region::Region;
use crate::path::shapes::{self, ArcLines};
use crate::path::{flatten, glyph, region, widen, PathBuffer, PointKind};
use crate::pen::Pen;
use crate::rasterizer::{NoopRasterizer, Rasterizer};
use crate::transform::Transform;

/// A snapshot of a device context's path-related state, taken by
/// `save`/restored by `restore`.
#[derive(Debug, Clone)]
struct PathSnapshot {
    closed: Option<PathBuffer>,
    open: Option<RecordingPath>,
}

/// The path-recording device context. Owns the transform, drawing
/// mode flags, pen, and fill mode this subsystem consumes from the host
/// graphics library, plus whatever path is open or closed on it.
pub struct DeviceContext<R: Rasterizer = NoopRasterizer> {
    pub transform: Transform,
    pub graphics_mode: GraphicsMode,
    pub arc_direction: ArcDirection,
    pub pen: Pen,
    pub fill_mode: PolyFillMode,
    cursor: Point,
    recording: Option<RecordingPath>,
    closed_path: Option<PathBuffer>,
    save_stack: Vec<PathSnapshot>,
    rasterizer: R,
}

impl<R: Rasterizer + Default> Default for DeviceContext<R> {
    fn default() -> Self {
        DeviceContext {
            transform: Transform::IDENTITY,
            graphics_mode: GraphicsMode::Compatible,
            arc_direction: ArcDirection::CounterClockwise,
            pen: Pen {
                width: 1,
                cap: crate::pen::CapStyle::Flat,
                join: crate::pen::JoinStyle::Miter,
                miter_limit: 10.0,
                cosmetic: false,
            },
            fill_mode: PolyFillMode::Alternate,
            cursor: Point::new(0, 0),
            recording: None,
            closed_path: None,
            save_stack: Vec::new(),
            rasterizer: R::default(),
        }
    }
}

impl<R: Rasterizer> DeviceContext<R> {
    pub fn with_rasterizer(rasterizer: R) -> Self
    where
        R: Default,
    {
        let mut dc = Self::default();
        dc.rasterizer = rasterizer;
        dc
    }

    #[inline]
    pub fn is_path_open(&self) -> bool {
        self.recording.is_some()
    }

    #[inline]
    pub fn has_closed_path(&self) -> bool {
        self.closed_path.is_some()
    }

    /// `begin_path`: no-op if already open. Fails with `OutOfMemory` if the
    /// new path's backing buffer can't be allocated, leaving any
    /// previously closed path untouched.
    pub fn begin_path(&mut self) -> Result<()> {
        if self.recording.is_some() {
            return Ok(());
        }
        log::trace!("begin_path at cursor {:?}", self.cursor);
        let recording = RecordingPath::new(self.cursor)?;
        self.recording = Some(recording);
        self.closed_path = None;
        Ok(())
    }

    /// `end_path`: fails if no recorder is open.
    pub fn end_path(&mut self) -> Result<()> {
        let recording = self.recording.take().ok_or(Error::CannotComplete)?;
        self.closed_path = Some(recording.into_buffer());
        Ok(())
    }

    /// `abort_path`: discards the open recorder, if any.
    pub fn abort_path(&mut self) {
        self.recording = None;
    }

    /// `close_figure`: routed straight to the recorder.
    pub fn close_figure(&mut self) {
        if let Some(recording) = &mut self.recording {
            recording.close_figure();
        }
    }

    #[inline]
    fn require_recording(&mut self) -> Result<&mut RecordingPath> {
        self.recording.as_mut().ok_or(Error::CannotComplete)
    }

    #[inline]
    fn require_closed(&self) -> Result<&PathBuffer> {
        self.closed_path.as_ref().ok_or(Error::CannotComplete)
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        match &mut self.recording {
            Some(recording) => {
                recording.move_to(&self.transform, x, y);
                self.cursor = recording.cursor();
            }
            None => self.cursor = self.transform.to_device(x, y),
        }
        Ok(())
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        recording.line_to(&transform, x, y)?;
        let cursor = recording.cursor();
        self.cursor = cursor;
        Ok(())
    }

    pub fn poly_line_to(&mut self, points: &[(f64, f64)]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        recording.poly_line_to(&transform, points)?;
        let cursor = recording.cursor();
        self.cursor = cursor;
        Ok(())
    }

    pub fn poly_bezier_to(&mut self, points: &[(f64, f64)]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        recording.poly_bezier_to(&transform, points)?;
        let cursor = recording.cursor();
        self.cursor = cursor;
        Ok(())
    }

    pub fn rectangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let mode = self.graphics_mode;
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::rectangle(recording, &transform, mode, x1, y1, x2, y2)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn round_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, ew: f64, eh: f64) -> Result<()> {
        let mode = self.graphics_mode;
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::round_rect(recording, &transform, mode, x1, y1, x2, y2, ew, eh)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        bbox: (f64, f64, f64, f64),
        start_ray: (f64, f64),
        end_ray: (f64, f64),
        lines: ArcLines,
    ) -> Result<()> {
        let mode = self.graphics_mode;
        let direction = self.arc_direction;
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::arc(recording, &transform, mode, direction, bbox, start_ray, end_ray, lines)?;
        let cursor = recording.cursor();
        self.cursor = cursor;
        Ok(())
    }

    pub fn ellipse(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let mode = self.graphics_mode;
        let direction = self.arc_direction;
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::ellipse(recording, &transform, mode, direction, x1, y1, x2, y2)
    }

    pub fn angle_arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, sweep: f64) -> Result<()> {
        let mode = self.graphics_mode;
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::angle_arc(recording, &transform, mode, cx, cy, r, start, sweep)?;
        let cursor = recording.cursor();
        self.cursor = cursor;
        Ok(())
    }

    pub fn poly_line(&mut self, points: &[(f64, f64)]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::poly_line(recording, &transform, points)
    }

    pub fn polygon(&mut self, points: &[(f64, f64)]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::polygon(recording, &transform, points)
    }

    pub fn poly_polyline(&mut self, sub_paths: &[Vec<(f64, f64)>]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::poly_polyline(recording, &transform, sub_paths)
    }

    pub fn poly_polygon(&mut self, sub_paths: &[Vec<(f64, f64)>]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        shapes::poly_polygon(recording, &transform, sub_paths)
    }

    pub fn poly_draw(&mut self, points: &[(f64, f64)], types: &[PointKind]) -> Result<()> {
        let transform = self.transform;
        let recording = self.require_recording()?;
        let result = shapes::poly_draw(recording, &transform, points, types);
        let cursor = recording.cursor();
        self.cursor = cursor;
        result
    }

    /// `ExtTextOut` glyph outline expansion: append one contour per
    /// call, as supplied by the external glyph outline extractor.
    pub fn text_out_contour(&mut self, start: (i32, i32), curves: &[GlyphCurve]) -> Result<()> {
        let recording = self.require_recording()?;
        glyph::append_contour(recording, start, curves)
    }

    /// `FLATTEN_PATH`: replaces the closed path with its flattened
    /// form. Atomic with respect to allocation failure: the stored path is
    /// only replaced once flattening has fully succeeded.
    pub fn flatten_path(&mut self) -> Result<()> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        self.closed_path = Some(flattened);
        Ok(())
    }

    /// `WIDEN_PATH`: flattens, then replaces the closed path with its
    /// widened (stroke-outline) form. Atomic the same way as
    /// [`Self::flatten_path`]: on failure partway through, the original
    /// closed path is left untouched.
    pub fn widen_path(&mut self) -> Result<()> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        let widened = widen::widen(&flattened, &self.pen)?;
        self.closed_path = Some(widened);
        Ok(())
    }

    /// `PATH_TO_REGION`: consumes the closed path once the region has been
    /// built successfully; a failure partway through (flattening or
    /// tessellation) leaves the closed path in place.
    pub fn path_to_region(&mut self) -> Result<Option<Region>> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        let region = region::path_to_region(&flattened, self.fill_mode)?;
        self.closed_path = None;
        Ok(region)
    }

    /// `GET_PATH`: copies points (converted to logical coordinates) and
    /// kinds out of the closed path. `capacity == 0` returns the count
    /// without copying; `capacity` less than the count fails with
    /// `InvalidParameter`.
    pub fn get_path(
        &self,
        out_points: Option<&mut [(f64, f64)]>,
        out_kinds: Option<&mut [PointKind]>,
        capacity: usize,
    ) -> Result<usize> {
        let closed = self.closed_path.as_ref().ok_or(Error::CannotComplete)?;
        let count = closed.len();
        if capacity == 0 {
            return Ok(count);
        }
        if capacity < count {
            return Err(Error::InvalidParameter);
        }
        let inverse = self.transform.inverted().unwrap_or_default();
        if let Some(points) = out_points {
            for (i, (point, _)) in closed.iter().enumerate() {
                points[i] = inverse.to_logical(point);
            }
        }
        if let Some(kinds) = out_kinds {
            for (i, (_, kind)) in closed.iter().enumerate() {
                kinds[i] = kind;
            }
        }
        Ok(count)
    }

    /// `FILL_PATH`: flattens the closed path (the one recoverable, OOM-only
    /// failure mode, which leaves the stored path untouched on failure),
    /// then consumes it and dispatches its sub-polygons to the rasterizer
    /// per §6 ("rasterizer fill/stroke entry points invoked after path
    /// consumption").
    pub fn fill_path(&mut self) -> Result<()> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        self.closed_path = None;
        let polygons: Vec<Vec<Point>> = flattened.sub_paths().into_iter().map(|(p, _)| p).collect();
        self.rasterizer.fill(&polygons, self.fill_mode)
    }

    /// `STROKE_PATH`: flattens and widens the closed path, then consumes it
    /// and dispatches the resulting polylines to the rasterizer.
    pub fn stroke_path(&mut self) -> Result<()> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        let stroked = widen::widen(&flattened, &self.pen)?;
        self.closed_path = None;
        let polylines: Vec<(Vec<Point>, bool)> = stroked.sub_paths();
        self.rasterizer.stroke(&polylines, &self.pen)
    }

    /// `STROKE_AND_FILL_PATH`: fills first, then strokes, the
    /// same closed path.
    pub fn stroke_and_fill_path(&mut self) -> Result<()> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        let stroked = widen::widen(&flattened, &self.pen)?;
        self.closed_path = None;
        let polygons: Vec<Vec<Point>> = flattened.sub_paths().into_iter().map(|(p, _)| p).collect();
        self.rasterizer.fill(&polygons, self.fill_mode)?;
        let polylines: Vec<(Vec<Point>, bool)> = stroked.sub_paths();
        self.rasterizer.stroke(&polylines, &self.pen)
    }

    /// `SELECT_CLIP_PATH`: consumes the closed path, building a
    /// region and handing it to the rasterizer's clip path via `fill` with
    /// the same fill mode (the rasterizer is expected to interpret a clip
    /// selection as a fill into its clip buffer).
    pub fn select_clip_path(&mut self) -> Result<()> {
        let flattened = flatten::flatten(self.require_closed()?)?;
        self.closed_path = None;
        let polygons: Vec<Vec<Point>> = flattened.sub_paths().into_iter().map(|(p, _)| p).collect();
        self.rasterizer.fill(&polygons, self.fill_mode)
    }

    /// Snapshot the path-related state for `SaveDC`.
    pub fn save(&mut self) {
        self.save_stack.push(PathSnapshot {
            closed: self.closed_path.clone(),
            open: self.recording.clone(),
        });
    }

    /// Restore the most recent snapshot taken by [`Self::save`]. A no-op if
    /// the save stack is empty.
    pub fn restore(&mut self) {
        if let Some(snapshot) = self.save_stack.pop() {
            self.closed_path = snapshot.closed;
            self.recording = snapshot.open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::GraphicsMode;
    use crate::path::PointKind;

    fn new_dc() -> DeviceContext<NoopRasterizer> {
        let mut dc: DeviceContext<NoopRasterizer> = DeviceContext::default();
        dc.graphics_mode = GraphicsMode::Advanced;
        dc
    }

    #[test]
    fn s1_rectangle_round_trips_through_get_path() {
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.rectangle(10.0, 20.0, 30.0, 40.0).unwrap();
        dc.end_path().unwrap();

        let count = dc.get_path(None, None, 0).unwrap();
        assert_eq!(count, 4);

        let mut points = vec![(0.0, 0.0); 4];
        let mut kinds = vec![PointKind::MOVE; 4];
        let got = dc.get_path(Some(&mut points), Some(&mut kinds), 4).unwrap();
        assert_eq!(got, 4);
        assert_eq!(points, vec![(30.0, 20.0), (10.0, 20.0), (10.0, 40.0), (30.0, 40.0)]);
        assert!(kinds[0].is_move());
        assert!(kinds[3].is_close_figure());
    }

    #[test]
    fn s2_move_line_continuation_round_trips() {
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.move_to(0.0, 0.0).unwrap();
        dc.line_to(5.0, 0.0).unwrap();
        dc.line_to(5.0, 5.0).unwrap();
        dc.close_figure();
        dc.end_path().unwrap();

        let count = dc.get_path(None, None, 0).unwrap();
        assert_eq!(count, 3);
        let mut points = vec![(0.0, 0.0); 3];
        dc.get_path(Some(&mut points), None, 3).unwrap();
        assert_eq!(points, vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
    }

    #[test]
    fn s5_poly_draw_with_bad_bezier_leaves_cursor_untouched() {
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.move_to(0.0, 0.0).unwrap();
        let ok = dc.poly_draw(&[(1.0, 1.0), (2.0, 2.0)], &[PointKind::BEZIER, PointKind::BEZIER]);
        assert!(ok.is_err());
    }

    #[test]
    fn s6_abort_path_discards_the_recorder() {
        // S6: begin_path; line_to(1,1); abort_path; begin_path; end_path;
        // get_path(cap=0) -> count=0, since abort discarded the line_to
        // and the fresh recording that follows it never records anything.
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.line_to(1.0, 1.0).unwrap();
        dc.abort_path();
        dc.begin_path().unwrap();
        dc.end_path().unwrap();
        let count = dc.get_path(None, None, 0).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn end_path_without_an_open_recorder_fails() {
        let mut dc = new_dc();
        assert_eq!(dc.end_path().unwrap_err(), Error::CannotComplete);
    }

    #[test]
    fn get_path_with_an_undersized_buffer_is_invalid_parameter() {
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        dc.end_path().unwrap();

        let mut points = vec![(0.0, 0.0); 2];
        let err = dc.get_path(Some(&mut points), None, 2).unwrap_err();
        assert_eq!(err, Error::InvalidParameter);
    }

    #[test]
    fn flatten_path_is_idempotent() {
        // S4: flattening an ellipse twice produces the same points.
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.ellipse(0.0, 0.0, 100.0, 100.0).unwrap();
        dc.end_path().unwrap();
        dc.flatten_path().unwrap();
        let count = dc.get_path(None, None, 0).unwrap();
        let mut p1 = vec![(0.0, 0.0); count];
        dc.get_path(Some(&mut p1), None, count).unwrap();

        dc.begin_path().unwrap();
        dc.ellipse(0.0, 0.0, 100.0, 100.0).unwrap();
        dc.end_path().unwrap();
        dc.flatten_path().unwrap();
        dc.flatten_path().unwrap();
        let count2 = dc.get_path(None, None, 0).unwrap();
        let mut p2 = vec![(0.0, 0.0); count2];
        dc.get_path(Some(&mut p2), None, count2).unwrap();

        assert_eq!(p1, p2);
    }

    #[test]
    fn save_restore_round_trips_an_open_recorder() {
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.line_to(1.0, 1.0).unwrap();
        dc.save();
        dc.line_to(2.0, 2.0).unwrap();
        dc.restore();
        dc.close_figure();
        dc.end_path().unwrap();

        let count = dc.get_path(None, None, 0).unwrap();
        // the second line_to should have been undone by restore.
        assert_eq!(count, 2);
    }

    #[test]
    fn widen_path_on_a_cosmetic_pen_fails() {
        let mut dc = new_dc();
        dc.pen.cosmetic = true;
        dc.begin_path().unwrap();
        dc.rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        dc.end_path().unwrap();
        assert_eq!(dc.widen_path().unwrap_err(), Error::CannotComplete);
    }

    #[test]
    fn path_to_region_of_a_rectangle_agrees_with_its_bounds() {
        let mut dc = new_dc();
        dc.begin_path().unwrap();
        dc.rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
        dc.end_path().unwrap();
        let region = dc.path_to_region().unwrap().unwrap();
        assert!(region.contains(5, 5));
        assert!(!region.contains(50, 50));
    }
}
