// MIT/Apache2 License

use crate::geometry::Point;
use crate::mode::PolyFillMode;
use crate::pen::Pen;
use crate::Result;

/// The rasterizer backing a device context: it turns the polygons and
/// polylines produced by this subsystem into actual pixels. The path
/// subsystem only ever calls into it at the very end of a terminal
/// operation, never the reverse.
///
/// A real backend implements this trait once per device context kind; the
/// no-op implementation below exists for testing and for contexts that
/// never rasterize (e.g. pure geometry extraction).
pub trait Rasterizer {
    /// Fill a set of sub-polygons (one `Vec` per figure) using `mode`.
    fn fill(&mut self, polygons: &[Vec<Point>], mode: PolyFillMode) -> Result<()>;

    /// Stroke a set of sub-polylines with the given pen.
    fn stroke(&mut self, polylines: &[(Vec<Point>, bool)], pen: &Pen) -> Result<()>;
}

/// The terminal link in the rasterizer chain: returns `CannotComplete` for
/// every operation. Used as the default rasterizer for a `DeviceContext`
/// that hasn't been bound to a real backend, exactly like the source
/// library's `NoopDrawer` terminates an otherwise-empty draw-method stack.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NoopRasterizer;

impl Rasterizer for NoopRasterizer {
    fn fill(&mut self, _polygons: &[Vec<Point>], _mode: PolyFillMode) -> Result<()> {
        Err(crate::Error::CannotComplete)
    }

    fn stroke(&mut self, _polylines: &[(Vec<Point>, bool)], _pen: &Pen) -> Result<()> {
        Err(crate::Error::CannotComplete)
    }
}
