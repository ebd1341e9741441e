//! Components defining a weighted forest structure on coordinate vertices.
//!
/// Every vertex has a collection of weighted edges to its children, ordered by
/// the children's coordinates, and at most one parent. Vertices that have not
/// been made the child of another vertex are roots. A vertex comes into
/// existence the first time an edge mentions it and disappears only when it is
/// removed explicitly.
mod ordered;

pub use ordered::{
    DuplicateParentError, Forest, ForestError, NoParentError, NoSuchEdgeError, OutgoingEdges,
    OutgoingVertices, Roots, Vertices, DEFAULT_WEIGHT,
};
