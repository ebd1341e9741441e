use std::collections::btree_map::{self, BTreeMap};
use std::iter::FusedIterator;

use thiserror::Error;
use tracing::{debug, trace};

use crate::Vertex;

/// Weight used for an edge when the caller has no particular weight in mind.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A forest of weighted edges between coordinate vertices, kept in ordered maps.
///
/// Every vertex has at most one parent. The parent link of a vertex and the
/// entry in its parent's child map are always added and removed together.
/// Vertices are created implicitly by the edge inserting operations and are
/// iterated in coordinate order.
///
/// Weights are intended to be positive but this is not checked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forest {
    nodes: BTreeMap<Vertex, NodeData>,
}

impl Forest {
    /// Creates a new empty forest.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Creates a forest by adding the given edges in order.
    ///
    /// # Errors
    ///
    /// Fails on the first edge whose destination already has a parent.
    ///
    /// # Example
    ///
    /// ```
    /// # use rooted_forest::Forest;
    /// let forest = Forest::from_edges([((0, 0), (1, 1), 2.5), ((0, 0), (2, 2), 1.0)]).unwrap();
    /// assert_eq!(forest.edge_weight((0, 0), (1, 1)), Ok(2.5));
    /// assert!(Forest::from_edges([((0, 0), (1, 1), 1.0), ((2, 2), (1, 1), 1.0)]).is_err());
    /// ```
    pub fn from_edges<S, D>(
        edges: impl IntoIterator<Item = (S, D, f64)>,
    ) -> Result<Self, DuplicateParentError>
    where
        S: Into<Vertex>,
        D: Into<Vertex>,
    {
        let mut forest = Self::new();
        for (source, destination, weight) in edges {
            forest.add_edge(source, destination, weight)?;
        }
        Ok(forest)
    }

    /// Adds a vertex without any edges.
    ///
    /// Returns `false` when the vertex already existed, in which case nothing changes.
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> bool {
        let vertex = vertex.into();
        match self.nodes.entry(vertex) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(entry) => {
                entry.insert(NodeData::default());
                trace!(%vertex, "added vertex");
                true
            }
        }
    }

    /// Adds an edge from `source` to `destination`, creating missing vertices.
    ///
    /// Self-loops are accepted as long as the vertex does not have a parent yet.
    ///
    /// # Errors
    ///
    /// When `destination` already has a parent. The forest is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use rooted_forest::{Forest, Vertex, DEFAULT_WEIGHT};
    /// let mut forest = Forest::new();
    /// forest.add_edge((0, 0), (1, 1), DEFAULT_WEIGHT).unwrap();
    ///
    /// let err = forest.add_edge((2, 2), (1, 1), 3.0).unwrap_err();
    /// assert_eq!(err.parent, Vertex::new(0, 0));
    /// assert!(!forest.has_vertex((2, 2)));
    /// ```
    pub fn add_edge(
        &mut self,
        source: impl Into<Vertex>,
        destination: impl Into<Vertex>,
        weight: f64,
    ) -> Result<(), DuplicateParentError> {
        let (source, destination) = (source.into(), destination.into());

        if let Some(parent) = self.incoming_vertex(destination) {
            debug!(%source, %destination, %parent, "rejected edge to attached vertex");
            return Err(DuplicateParentError {
                vertex: destination,
                parent,
            });
        }

        self.attach(source, destination, weight);
        Ok(())
    }

    /// Subdivides the edge `source -> destination` with `inserted`.
    ///
    /// Removes the edge `source -> destination` if there is one and adds the
    /// edges `source -> inserted` and `inserted -> destination` with the given
    /// weights.
    ///
    /// # Errors
    ///
    /// When one of the new edges would give a vertex a second parent, i.e.
    ///
    ///  - `inserted` already has a parent (other than through the removed edge),
    ///  - `destination` has a parent but is not a child of `source`,
    ///  - `inserted` and `destination` are the same vertex.
    ///
    /// All conditions are checked before anything is modified, so the forest
    /// is unchanged on failure.
    ///
    /// # Example
    ///
    /// ```
    /// # use rooted_forest::Forest;
    /// let mut forest = Forest::from_edges([((0, 0), (2, 2), 4.0)]).unwrap();
    /// forest.insert_vertex((0, 0), (1, 1), (2, 2), 1.5, 2.5).unwrap();
    ///
    /// assert!(!forest.has_edge((0, 0), (2, 2)));
    /// assert_eq!(forest.edge_weight((0, 0), (1, 1)), Ok(1.5));
    /// assert_eq!(forest.edge_weight((1, 1), (2, 2)), Ok(2.5));
    /// ```
    pub fn insert_vertex(
        &mut self,
        source: impl Into<Vertex>,
        inserted: impl Into<Vertex>,
        destination: impl Into<Vertex>,
        first_weight: f64,
        second_weight: f64,
    ) -> Result<(), DuplicateParentError> {
        let source = source.into();
        let inserted = inserted.into();
        let destination = destination.into();

        // The parent of a vertex once the subdivided edge is gone.
        let detached = self.has_edge(source, destination);
        let parent_after = |vertex: Vertex| match self.incoming_vertex(vertex) {
            Some(_) if detached && vertex == destination => None,
            parent => parent,
        };

        let conflict = if let Some(parent) = parent_after(inserted) {
            Some(DuplicateParentError {
                vertex: inserted,
                parent,
            })
        } else if inserted == destination {
            Some(DuplicateParentError {
                vertex: destination,
                parent: source,
            })
        } else {
            parent_after(destination).map(|parent| DuplicateParentError {
                vertex: destination,
                parent,
            })
        };

        if let Some(err) = conflict {
            debug!(%source, %inserted, %destination, vertex = %err.vertex, "rejected subdivision");
            return Err(err);
        }

        self.remove_edge(source, destination);
        self.attach(source, inserted, first_weight);
        self.attach(inserted, destination, second_weight);
        Ok(())
    }

    /// Links `destination`, which must be a root, below `source`.
    fn attach(&mut self, source: Vertex, destination: Vertex, weight: f64) {
        self.nodes
            .entry(source)
            .or_default()
            .children
            .insert(destination, weight);
        self.nodes.entry(destination).or_default().parent = Parent::Attached(source, weight);
        trace!(%source, %destination, weight, "added edge");
    }

    /// Removes the edge from `source` to `destination` but keeps both vertices.
    ///
    /// Returns the weight of the removed edge or `None` if there was no such edge.
    pub fn remove_edge(
        &mut self,
        source: impl Into<Vertex>,
        destination: impl Into<Vertex>,
    ) -> Option<f64> {
        let (source, destination) = (source.into(), destination.into());
        let weight = self.nodes.get_mut(&source)?.children.remove(&destination)?;

        if let Some(node_data) = self.nodes.get_mut(&destination) {
            node_data.parent = Parent::Rooted;
        }

        trace!(%source, %destination, "removed edge");
        Some(weight)
    }

    /// Removes a vertex together with its incoming and outgoing edges.
    ///
    /// The former children become roots. Returns `false` if the vertex did not exist.
    pub fn remove_vertex(&mut self, vertex: impl Into<Vertex>) -> bool {
        let vertex = vertex.into();
        let Some(node_data) = self.nodes.remove(&vertex) else {
            return false;
        };

        for child in node_data.children.keys() {
            if let Some(child_data) = self.nodes.get_mut(child) {
                child_data.parent = Parent::Rooted;
            }
        }

        if let Parent::Attached(parent, _) = node_data.parent {
            if let Some(parent_data) = self.nodes.get_mut(&parent) {
                parent_data.children.remove(&vertex);
            }
        }

        trace!(%vertex, "removed vertex");
        true
    }

    /// Removes a vertex and every vertex below it.
    ///
    /// Returns the number of removed vertices, which is zero when the vertex
    /// did not exist. Cycles in the child relation are tolerated.
    ///
    /// # Example
    ///
    /// ```
    /// # use rooted_forest::{Forest, Vertex};
    /// let mut forest = Forest::from_edges([
    ///     ((0, 0), (1, 1), 1.0),
    ///     ((1, 1), (2, 2), 1.0),
    ///     ((1, 1), (3, 3), 1.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(forest.remove_branch((1, 1)), 3);
    /// assert!(forest.vertices().eq([Vertex::new(0, 0)]));
    /// assert!(!forest.has_any_edge());
    /// ```
    pub fn remove_branch(&mut self, vertex: impl Into<Vertex>) -> usize {
        let vertex = vertex.into();
        if let Some(parent) = self.incoming_vertex(vertex) {
            self.remove_edge(parent, vertex);
        }

        let mut removed = 0;
        let mut stack = vec![vertex];

        while let Some(current) = stack.pop() {
            let Some(node_data) = self.nodes.remove(&current) else {
                continue;
            };
            removed += 1;
            stack.extend(node_data.children.into_keys());
        }

        trace!(%vertex, removed, "removed branch");
        removed
    }

    /// Iterates over all vertices in coordinate order.
    #[inline]
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices {
            iter: self.nodes.keys(),
        }
    }

    /// Iterates over the vertices without a parent in coordinate order.
    #[inline]
    pub fn roots(&self) -> Roots<'_> {
        Roots {
            iter: self.nodes.iter(),
        }
    }

    /// Iterates over the children of a vertex.
    ///
    /// Empty when the vertex does not exist.
    #[inline]
    pub fn outgoing_vertices(&self, vertex: impl Into<Vertex>) -> OutgoingVertices<'_> {
        OutgoingVertices {
            iter: self.children(vertex.into()).map(BTreeMap::keys),
        }
    }

    /// Iterates over the children of a vertex together with the edge weights.
    ///
    /// Empty when the vertex does not exist.
    #[inline]
    pub fn outgoing_edges(&self, vertex: impl Into<Vertex>) -> OutgoingEdges<'_> {
        OutgoingEdges {
            iter: self.children(vertex.into()).map(BTreeMap::iter),
        }
    }

    /// Returns a vertex's parent or `None` if it is a root or does not exist.
    #[inline]
    pub fn incoming_vertex(&self, vertex: impl Into<Vertex>) -> Option<Vertex> {
        self.incoming_edge(vertex).ok().map(|(parent, _)| parent)
    }

    /// Returns a vertex's parent together with the weight of the edge from it.
    ///
    /// # Errors
    ///
    /// When the vertex is a root or does not exist.
    pub fn incoming_edge(
        &self,
        vertex: impl Into<Vertex>,
    ) -> Result<(Vertex, f64), NoParentError> {
        let vertex = vertex.into();
        match self.nodes.get(&vertex).map(|node_data| node_data.parent) {
            Some(Parent::Attached(parent, weight)) => Ok((parent, weight)),
            _ => Err(NoParentError { vertex }),
        }
    }

    /// Returns whether the forest contains the vertex.
    #[inline]
    pub fn has_vertex(&self, vertex: impl Into<Vertex>) -> bool {
        self.nodes.contains_key(&vertex.into())
    }

    /// Returns whether there is an edge from `source` to `destination`.
    #[inline]
    pub fn has_edge(&self, source: impl Into<Vertex>, destination: impl Into<Vertex>) -> bool {
        self.children(source.into())
            .map_or(false, |children| children.contains_key(&destination.into()))
    }

    /// Returns whether the forest contains at least one edge.
    pub fn has_any_edge(&self) -> bool {
        self.nodes
            .values()
            .any(|node_data| !node_data.children.is_empty())
    }

    /// Returns the weight of the edge from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// When there is no such edge, including when `source` does not exist.
    pub fn edge_weight(
        &self,
        source: impl Into<Vertex>,
        destination: impl Into<Vertex>,
    ) -> Result<f64, NoSuchEdgeError> {
        let (source, destination) = (source.into(), destination.into());
        self.children(source)
            .and_then(|children| children.get(&destination))
            .copied()
            .ok_or(NoSuchEdgeError {
                from: source,
                to: destination,
            })
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node_data| node_data.children.len())
            .sum()
    }

    /// Whether the forest has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn children(&self, vertex: Vertex) -> Option<&BTreeMap<Vertex, f64>> {
        self.nodes.get(&vertex).map(|node_data| &node_data.children)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct NodeData {
    /// The parent of the vertex and the weight of the edge from it.
    parent: Parent,
    /// The children of the vertex with the weights of the edges to them.
    children: BTreeMap<Vertex, f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Parent {
    #[default]
    Rooted,
    Attached(Vertex, f64),
}

/// Iterator over the vertices of a [`Forest`].
#[derive(Debug, Clone)]
pub struct Vertices<'a> {
    iter: btree_map::Keys<'a, Vertex, NodeData>,
}

impl<'a> Iterator for Vertices<'a> {
    type Item = Vertex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().copied()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Vertices<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().copied()
    }
}

impl<'a> ExactSizeIterator for Vertices<'a> {}
impl<'a> FusedIterator for Vertices<'a> {}

/// Iterator over the root vertices of a [`Forest`].
#[derive(Debug, Clone)]
pub struct Roots<'a> {
    iter: btree_map::Iter<'a, Vertex, NodeData>,
}

impl<'a> Iterator for Roots<'a> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .find(|(_, node_data)| node_data.parent == Parent::Rooted)
            .map(|(vertex, _)| *vertex)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<'a> FusedIterator for Roots<'a> {}

/// Iterator over the children of a vertex.
#[derive(Debug, Clone)]
pub struct OutgoingVertices<'a> {
    iter: Option<btree_map::Keys<'a, Vertex, f64>>,
}

impl<'a> Iterator for OutgoingVertices<'a> {
    type Item = Vertex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.as_mut()?.next().copied()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter
            .as_ref()
            .map_or((0, Some(0)), |iter| iter.size_hint())
    }
}

impl<'a> ExactSizeIterator for OutgoingVertices<'a> {}
impl<'a> FusedIterator for OutgoingVertices<'a> {}

/// Iterator over the outgoing edges of a vertex as `(child, weight)` pairs.
#[derive(Debug, Clone)]
pub struct OutgoingEdges<'a> {
    iter: Option<btree_map::Iter<'a, Vertex, f64>>,
}

impl<'a> Iterator for OutgoingEdges<'a> {
    type Item = (Vertex, f64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .as_mut()?
            .next()
            .map(|(child, weight)| (*child, *weight))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter
            .as_ref()
            .map_or((0, Some(0)), |iter| iter.size_hint())
    }
}

impl<'a> ExactSizeIterator for OutgoingEdges<'a> {}
impl<'a> FusedIterator for OutgoingEdges<'a> {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("vertex {vertex} already has parent {parent}")]
pub struct DuplicateParentError {
    /// The vertex that would have received a second parent.
    pub vertex: Vertex,
    /// The parent the vertex already has.
    pub parent: Vertex,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("vertex {vertex} has no parent")]
pub struct NoParentError {
    pub vertex: Vertex,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no edge from {from} to {to}")]
pub struct NoSuchEdgeError {
    pub from: Vertex,
    pub to: Vertex,
}

/// Any error produced by a [`Forest`] operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error(transparent)]
    DuplicateParent(#[from] DuplicateParentError),
    #[error(transparent)]
    NoParent(#[from] NoParentError),
    #[error(transparent)]
    NoSuchEdge(#[from] NoSuchEdgeError),
}
