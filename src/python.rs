//! Python bindings for [`Forest`], enabled by the `pyo3` feature.
//!
//! Vertices cross the boundary as `(x, y)` tuples. A rejected edge raises
//! `ValueError`; a missing parent or edge raises `KeyError`.
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::{DuplicateParentError, Forest, NoParentError, NoSuchEdgeError};

type Coords = (i64, i64);

impl From<DuplicateParentError> for PyErr {
    fn from(err: DuplicateParentError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<NoParentError> for PyErr {
    fn from(err: NoParentError) -> Self {
        PyKeyError::new_err(err.to_string())
    }
}

impl From<NoSuchEdgeError> for PyErr {
    fn from(err: NoSuchEdgeError) -> Self {
        PyKeyError::new_err(err.to_string())
    }
}

#[pyclass(name = "Forest")]
#[derive(Debug, Clone, Default)]
pub struct PyForest {
    forest: Forest,
}

impl PyForest {
    /// Borrows the wrapped forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }
}

impl From<Forest> for PyForest {
    fn from(forest: Forest) -> Self {
        Self { forest }
    }
}

#[pymethods]
impl PyForest {
    #[new]
    #[pyo3(signature = (edges = Vec::new()))]
    fn new(edges: Vec<(Coords, Coords, f64)>) -> PyResult<Self> {
        Ok(Forest::from_edges(edges)?.into())
    }

    #[pyo3(signature = (source, destination, weight = crate::DEFAULT_WEIGHT))]
    fn add_edge(&mut self, source: Coords, destination: Coords, weight: f64) -> PyResult<()> {
        Ok(self.forest.add_edge(source, destination, weight)?)
    }

    #[pyo3(signature = (
        source,
        inserted,
        destination,
        weight_1 = crate::DEFAULT_WEIGHT,
        weight_2 = crate::DEFAULT_WEIGHT,
    ))]
    fn insert_vertex(
        &mut self,
        source: Coords,
        inserted: Coords,
        destination: Coords,
        weight_1: f64,
        weight_2: f64,
    ) -> PyResult<()> {
        Ok(self
            .forest
            .insert_vertex(source, inserted, destination, weight_1, weight_2)?)
    }

    fn add_vertex(&mut self, vertex: Coords) -> bool {
        self.forest.add_vertex(vertex)
    }

    fn remove_edge(&mut self, source: Coords, destination: Coords) -> Option<f64> {
        self.forest.remove_edge(source, destination)
    }

    fn remove_vertex(&mut self, vertex: Coords) -> bool {
        self.forest.remove_vertex(vertex)
    }

    fn remove_branch(&mut self, vertex: Coords) -> usize {
        self.forest.remove_branch(vertex)
    }

    fn get_vertices(&self) -> Vec<Coords> {
        self.forest.vertices().map(Coords::from).collect()
    }

    fn get_roots(&self) -> Vec<Coords> {
        self.forest.roots().map(Coords::from).collect()
    }

    fn get_outgoing_vertices(&self, vertex: Coords) -> Vec<Coords> {
        self.forest
            .outgoing_vertices(vertex)
            .map(Coords::from)
            .collect()
    }

    fn get_incoming_vertex(&self, vertex: Coords) -> Option<Coords> {
        self.forest.incoming_vertex(vertex).map(Coords::from)
    }

    fn get_outgoing_edges(&self, vertex: Coords) -> Vec<(Coords, f64)> {
        self.forest
            .outgoing_edges(vertex)
            .map(|(child, weight)| (child.into(), weight))
            .collect()
    }

    fn get_incoming_edge(&self, vertex: Coords) -> PyResult<(Coords, f64)> {
        let (parent, weight) = self.forest.incoming_edge(vertex)?;
        Ok((parent.into(), weight))
    }

    fn has_vertex(&self, vertex: Coords) -> bool {
        self.forest.has_vertex(vertex)
    }

    #[pyo3(signature = (source = None, destination = None))]
    fn has_edge(&self, source: Option<Coords>, destination: Option<Coords>) -> PyResult<bool> {
        match (source, destination) {
            (Some(source), Some(destination)) => Ok(self.forest.has_edge(source, destination)),
            (None, None) => Ok(self.forest.has_any_edge()),
            _ => Err(PyValueError::new_err(
                "has_edge takes either no vertices or both a source and a destination",
            )),
        }
    }

    fn edge_weight(&self, source: Coords, destination: Coords) -> PyResult<f64> {
        Ok(self.forest.edge_weight(source, destination)?)
    }

    fn __len__(&self) -> usize {
        self.forest.vertex_count()
    }

    fn __contains__(&self, vertex: Coords) -> bool {
        self.forest.has_vertex(vertex)
    }

    fn __repr__(&self) -> String {
        format!(
            "Forest(vertices={}, edges={})",
            self.forest.vertex_count(),
            self.forest.edge_count()
        )
    }
}

/// Python module exposing the forest type.
#[pymodule]
fn rooted_forest(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyForest>()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Vertex;

    #[test]
    fn wraps_forest() {
        let mut forest = PyForest::from(Forest::new());
        forest.add_edge((0, 0), (1, 1), 2.0).unwrap();
        assert_eq!(forest.get_incoming_vertex((1, 1)), Some((0, 0)));
        assert_eq!(forest.get_outgoing_edges((0, 0)), [((1, 1), 2.0)]);
        assert_eq!(forest.forest().incoming_vertex((1, 1)), Some(Vertex::new(0, 0)));
    }
}
