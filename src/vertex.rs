use std::fmt;

/// Identifier of a vertex: a pair of integer coordinates.
///
/// Two vertices with the same coordinates are the same vertex. The ordering is
/// lexicographic on `(x, y)`, which is also the order in which a
/// [`Forest`](crate::Forest) iterates its vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Vertex {
    pub x: i64,
    pub y: i64,
}

impl Vertex {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Vertex {
    #[inline]
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vertex> for (i64, i64) {
    #[inline]
    fn from(vertex: Vertex) -> Self {
        (vertex.x, vertex.y)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
