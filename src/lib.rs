// MIT/Apache2 License

//! `gdipath` records the path primitives a 2D device context issues —
//! moves, lines, cubic Béziers, and the higher-level shape constructors
//! built on top of them (rectangles, round-rectangles, arcs, chords, pies,
//! ellipses, polylines/polygons, `PolyDraw`, glyph outlines) — and supports
//! the four closed-form transformations on a recorded path: **flattening**
//! (Bézier to polyline), **widening** (stroking along a pen), **region
//! conversion** (path to filled polygon region), and **extraction**
//! (readback in logical coordinates).
//!
//! The subsystem is deliberately narrow: device context management, pen and
//! brush selection, the affine transform itself, glyph outline extraction,
//! and rasterization are all external collaborators it only consumes,
//! mirrored here as the [`Transform`](transform::Transform),
//! [`Pen`](pen::Pen), and [`Rasterizer`](rasterizer::Rasterizer) types.
//!
//! The entry point for a host graphics library is [`DeviceContext`], which
//! dispatches geometric primitives to an open path recorder or straight
//! through, and implements the terminal operations (`fill_path`,
//! `stroke_path`, `get_path`, and friends).

pub mod driver;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod path;
pub mod pen;
pub mod rasterizer;
pub mod transform;

pub use driver::DeviceContext;
pub use error::{Error, Result};
pub use geometry::{Point, PointF, Rect, RectF};
pub use mode::{ArcDirection, GraphicsMode, PolyFillMode};
pub use path::recorder::RecordingPath;
pub use path::region::Region;
pub use path::shapes::ArcLines;
pub use path::{PathBuffer, Primary, PointKind};
pub use pen::{CapStyle, JoinStyle, Pen};
pub use rasterizer::{NoopRasterizer, Rasterizer};
pub use transform::Transform;
