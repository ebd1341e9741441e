//! A positive-weighted rooted forest on integer coordinate vertices.
//!
//! A [`Forest`] is a directed, edge-weighted graph in which every vertex has
//! at most one incoming edge, i.e. a disjoint union of arborescences. It
//! supports adding edges, subdividing an edge by inserting a vertex, removing
//! edges, vertices and whole branches, and single-hop adjacency queries.
//!
//! ```
//! use rooted_forest::{Forest, Vertex, DEFAULT_WEIGHT};
//!
//! let mut forest = Forest::new();
//! forest.add_edge((0, 0), (2, 2), 5.0).unwrap();
//! forest.insert_vertex((0, 0), (1, 1), (2, 2), DEFAULT_WEIGHT, 4.0).unwrap();
//!
//! assert!(forest.outgoing_vertices((0, 0)).eq([Vertex::new(1, 1)]));
//! assert_eq!(forest.incoming_edge((2, 2)), Ok((Vertex::new(1, 1), 4.0)));
//! assert!(forest.add_edge((0, 0), (2, 2), 1.0).is_err());
//! ```

pub mod forest;
mod macros;
#[cfg(feature = "pyo3")]
pub mod python;
mod vertex;

pub use forest::{
    DuplicateParentError, Forest, ForestError, NoParentError, NoSuchEdgeError, DEFAULT_WEIGHT,
};
pub use vertex::Vertex;
