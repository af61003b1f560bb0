// MIT/Apache2 License

//! The path buffer: a pair of growable arrays tying together
//! device-space points and the point-kind flags that describe how they
//! connect to their predecessor.
//!
//! The dual-array layout is a deliberate performance contract carried over
//! from the source this subsystem is modeled on: many call sites need a
//! pointer to a single flag byte so they can patch it after the fact (e.g.
//! downgrading the leading point of a run to `MOVE`). A tagged sum-type of
//! entries would require reconstructing the whole run to do the same thing.

pub mod flatten;
pub mod glyph;
pub mod recorder;
pub mod region;
pub mod shapes;
pub mod widen;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::transform::Transform;

/// Primary classification of a path entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primary {
    Move,
    Line,
    Bezier,
}

const PRIMARY_MASK: u8 = 0b011;
const CLOSE_FIGURE_BIT: u8 = 0b100;

/// The kind of a single path entry: a primary type (`MOVE`/`LINE`/`BEZIER`)
/// plus an optional `CLOSE_FIGURE` bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointKind(u8);

impl PointKind {
    pub const MOVE: PointKind = PointKind(0);
    pub const LINE: PointKind = PointKind(1);
    pub const BEZIER: PointKind = PointKind(2);

    #[inline]
    pub fn primary(self) -> Primary {
        match self.0 & PRIMARY_MASK {
            0 => Primary::Move,
            1 => Primary::Line,
            2 => Primary::Bezier,
            _ => unreachable!("point kind primary value out of range"),
        }
    }

    #[inline]
    pub fn is_move(self) -> bool {
        matches!(self.primary(), Primary::Move)
    }

    #[inline]
    pub fn is_bezier(self) -> bool {
        matches!(self.primary(), Primary::Bezier)
    }

    #[inline]
    pub fn is_close_figure(self) -> bool {
        self.0 & CLOSE_FIGURE_BIT != 0
    }

    /// Return this kind with the `CLOSE_FIGURE` bit set.
    #[inline]
    pub fn with_close_figure(self) -> PointKind {
        PointKind(self.0 | CLOSE_FIGURE_BIT)
    }
}

/// A recorded path: parallel arrays of device-space points and point kinds.
///
/// Invariants: entry 0, if present, is a `MOVE`; `CLOSE_FIGURE` only
/// ever marks the last entry of a figure, and the entry after it (if any) is
/// a `MOVE`; runs of `BEZIER` entries between non-`BEZIER` entries always
/// have a length that's a multiple of three.
#[derive(Debug, Clone)]
pub struct PathBuffer {
    points: Vec<(i32, i32)>,
    kinds: Vec<PointKind>,
}

impl PathBuffer {
    /// Starting capacity for a freshly allocated path.
    pub const INITIAL_CAPACITY: usize = 16;

    /// Allocate a new, empty path buffer with room for
    /// [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY) entries.
    pub fn new() -> Result<Self> {
        let mut points = Vec::new();
        let mut kinds = Vec::new();
        points
            .try_reserve_exact(Self::INITIAL_CAPACITY)
            .map_err(|_| Error::OutOfMemory)?;
        kinds
            .try_reserve_exact(Self::INITIAL_CAPACITY)
            .map_err(|_| Error::OutOfMemory)?;
        Ok(PathBuffer { points, kinds })
    }

    /// An empty path buffer with no backing allocation; used for results
    /// (flatten, widen) that are built up with `add_points_device` calls
    /// that will reserve as needed.
    pub(crate) fn empty() -> Self {
        PathBuffer {
            points: Vec::new(),
            kinds: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Grow both arrays so their capacity is at least `total_len_needed`,
    /// doubling at least. The two arrays are grown one after the
    /// other; if the second grow fails, the first is left expanded and the
    /// caller is expected to abort the path.
    fn reserve(&mut self, total_len_needed: usize) -> Result<()> {
        let cap = self.points.capacity();
        if total_len_needed > cap {
            let new_cap = total_len_needed.max(cap * 2).max(Self::INITIAL_CAPACITY);
            let additional_points = new_cap - self.points.len();
            self.points
                .try_reserve_exact(additional_points)
                .map_err(|_| Error::OutOfMemory)?;
            let additional_kinds = new_cap - self.kinds.len();
            self.kinds
                .try_reserve_exact(additional_kinds)
                .map_err(|_| Error::OutOfMemory)?;
            log::debug!("path buffer grew to capacity {}", new_cap);
        }
        Ok(())
    }

    /// Append `points` verbatim (already in device space), all tagged with
    /// `kind`. Returns the index of the first newly-appended entry, so
    /// callers can patch its kind afterwards (e.g. downgrade to `MOVE`).
    pub fn add_points_device(&mut self, points: &[Point], kind: PointKind) -> Result<usize> {
        let start = self.points.len();
        if points.is_empty() {
            return Ok(start);
        }
        self.reserve(start + points.len())?;
        self.points.extend(points.iter().map(|p| (p.x, p.y)));
        self.kinds.extend(std::iter::repeat(kind).take(points.len()));
        Ok(start)
    }

    /// Append `points`, first converting them from logical to device space
    /// via `transform`.
    pub fn add_points_logical(
        &mut self,
        points: &[(f64, f64)],
        kind: PointKind,
        transform: &Transform,
    ) -> Result<usize> {
        let device: Vec<Point> = points
            .iter()
            .map(|&(x, y)| transform.to_device(x, y))
            .collect();
        self.add_points_device(&device, kind)
    }

    #[inline]
    pub fn point_at(&self, index: usize) -> Point {
        let (x, y) = self.points[index];
        Point { x, y }
    }

    #[inline]
    pub fn kind_at(&self, index: usize) -> PointKind {
        self.kinds[index]
    }

    #[inline]
    pub fn patch_kind(&mut self, index: usize, kind: PointKind) {
        self.kinds[index] = kind;
    }

    #[inline]
    pub fn set_close_figure(&mut self, index: usize) {
        self.kinds[index] = self.kinds[index].with_close_figure();
    }

    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().map(|&(x, y)| Point { x, y })
    }

    #[inline]
    pub fn last_kind(&self) -> Option<PointKind> {
        self.kinds.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, PointKind)> + '_ {
        self.points
            .iter()
            .zip(self.kinds.iter())
            .map(|(&(x, y), &k)| (Point { x, y }, k))
    }

    /// Split this path into sub-paths (figures) on each `MOVE` entry, used
    /// by the widener and the region bridge. Each sub-path is
    /// returned as `(points, closed)`.
    pub(crate) fn sub_paths(&self) -> Vec<(Vec<Point>, bool)> {
        let mut out = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut closed = false;
        for (point, kind) in self.iter() {
            if kind.is_move() && !current.is_empty() {
                out.push((std::mem::take(&mut current), closed));
                closed = false;
            }
            current.push(point);
            if kind.is_close_figure() {
                closed = true;
            }
        }
        if !current.is_empty() {
            out.push((current, closed));
        }
        out
    }

    /// Check the path buffer's structural invariants (entry 0 is `MOVE`,
    /// Bézier runs come in multiples of three). Used by tests; not called
    /// on the hot path.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> bool {
        if self.points.len() != self.kinds.len() {
            return false;
        }
        if let Some(first) = self.kinds.first() {
            if !first.is_move() {
                return false;
            }
        }
        let mut run = 0usize;
        for (i, kind) in self.kinds.iter().enumerate() {
            if kind.is_bezier() {
                run += 1;
            } else {
                if run % 3 != 0 {
                    return false;
                }
                run = 0;
            }
            if kind.is_close_figure() {
                if let Some(next) = self.kinds.get(i + 1) {
                    if !next.is_move() {
                        return false;
                    }
                }
            }
        }
        run % 3 == 0
    }
}
