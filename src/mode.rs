// MIT/Apache2 License

/// The polygon fill rule used by `fill_path`/`path_to_region`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolyFillMode {
    Alternate,
    Winding,
}

/// Legacy half-open-rectangle convention (glossary): "compatible" graphics
/// mode excludes the right and bottom edges of rectangles and shrinks arc
/// bounding boxes by one device unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GraphicsMode {
    Compatible,
    Advanced,
}

/// Orientation convention for sweeping angles (glossary).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl ArcDirection {
    #[inline]
    pub(crate) fn is_clockwise(self) -> bool {
        matches!(self, ArcDirection::Clockwise)
    }
}
