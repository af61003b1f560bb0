// MIT/Apache2 License

//! The region bridge: hands a flattened, closed path to the polygon
//! tessellator and wraps the result in an opaque, containment-testable
//! [`Region`].

use lyon_path::math::point;
use lyon_path::Path as LyonPath;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

use super::PathBuffer;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::mode::PolyFillMode;

/// An opaque, tessellated region: the triangulated interior of a
/// path, queryable for point containment.
#[derive(Debug, Clone)]
pub struct Region {
    triangles: Vec<[Point; 3]>,
}

impl Region {
    /// Point-in-region test at an integer device coordinate.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let p = (x as f32, y as f32);
        self.triangles.iter().any(|tri| point_in_triangle(p, tri))
    }
}

fn point_in_triangle(p: (f32, f32), tri: &[Point; 3]) -> bool {
    let sign = |a: (f32, f32), b: (f32, f32), c: (f32, f32)| {
        (a.0 - c.0) * (b.1 - c.1) - (b.0 - c.0) * (a.1 - c.1)
    };
    let a = (tri[0].x as f32, tri[0].y as f32);
    let b = (tri[1].x as f32, tri[1].y as f32);
    let c = (tri[2].x as f32, tri[2].y as f32);
    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

struct PointCtor;

impl FillVertexConstructor<Point> for PointCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> Point {
        let p = vertex.position();
        Point::new(p.x.round() as i32, p.y.round() as i32)
    }
}

/// `path_to_region`: `None` for an empty path, otherwise the
/// tessellated region honoring `fill_mode`.
pub fn path_to_region(source: &PathBuffer, fill_mode: PolyFillMode) -> Result<Option<Region>> {
    if source.is_empty() {
        return Ok(None);
    }

    let mut builder = LyonPath::builder();
    for (points, _closed) in source.sub_paths() {
        if points.len() < 3 {
            continue;
        }
        builder.begin(point(points[0].x as f32, points[0].y as f32));
        for p in &points[1..] {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut geometry: VertexBuffers<Point, u16> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    let options = FillOptions::default().with_fill_rule(match fill_mode {
        PolyFillMode::Alternate => FillRule::EvenOdd,
        PolyFillMode::Winding => FillRule::NonZero,
    });
    tessellator
        .tessellate_path(&path, &options, &mut BuffersBuilder::new(&mut geometry, PointCtor))
        .map_err(|_| Error::CannotComplete)?;

    let triangles = geometry
        .indices
        .chunks_exact(3)
        .map(|c| {
            [
                geometry.vertices[c[0] as usize],
                geometry.vertices[c[1] as usize],
                geometry.vertices[c[2] as usize],
            ]
        })
        .collect();

    Ok(Some(Region { triangles }))
}
