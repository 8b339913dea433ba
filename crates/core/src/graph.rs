//! Adjacency-list graph used by the interactive manager
//!
//! Each vertex maps to an insertion-ordered list of [`Neighbor`] entries.
//! Undirected edges are stored twice (once per endpoint) and kept in sync by
//! the mutation methods; an undirected self-loop is stored once.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, Result};

/// Vertex label. The core places no restriction on its length.
pub type Vertex = String;

/// Integer edge weight.
pub type Weight = i64;

/// One outgoing adjacency of a vertex
///
/// `weight` is always `None` in an unweighted graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    /// Vertex this entry points at
    pub target: Vertex,
    /// Edge weight, if the graph is weighted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

impl Neighbor {
    /// Create an entry pointing at `target`
    pub fn new(target: impl Into<Vertex>, weight: Option<Weight>) -> Self {
        Self {
            target: target.into(),
            weight,
        }
    }
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(w) => write!(f, "{} (weight: {})", self.target, w),
            None => write!(f, "{}", self.target),
        }
    }
}

/// A small directed or undirected, weighted or unweighted graph
///
/// `Clone` produces a fully independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub(crate) directed: bool,
    pub(crate) weighted: bool,
    /// Vertex -> ordered neighbor entries, crate-visible so persistence and
    /// export can walk it
    pub(crate) adjacency: IndexMap<Vertex, Vec<Neighbor>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            adjacency: IndexMap::new(),
        }
    }

    /// Whether edges have a single direction
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether edges carry an integer weight
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Check whether a vertex is present
    pub fn has_vertex(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Neighbor entries of a vertex in insertion order
    pub fn neighbors(&self, vertex: &str) -> Option<&[Neighbor]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    /// Iterate over all vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Iterate over `(vertex, neighbor entries)` in insertion order
    pub fn adjacency(&self) -> impl Iterator<Item = (&str, &[Neighbor])> {
        self.adjacency
            .iter()
            .map(|(vertex, neighbors)| (vertex.as_str(), neighbors.as_slice()))
    }

    /// Get the number of vertices in the graph
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of stored neighbor entries
    ///
    /// An undirected edge between two distinct vertices counts twice.
    pub fn edge_entry_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Add a vertex with no neighbors; does nothing if it already exists
    pub fn add_vertex(&mut self, vertex: &str) {
        if !self.adjacency.contains_key(vertex) {
            debug!(vertex, "adding vertex");
            self.adjacency.insert(vertex.to_string(), Vec::new());
        }
    }

    /// Remove a vertex and every neighbor entry pointing at it
    pub fn remove_vertex(&mut self, vertex: &str) {
        if self.adjacency.shift_remove(vertex).is_some() {
            debug!(vertex, "removed vertex");
        }

        for neighbors in self.adjacency.values_mut() {
            neighbors.retain(|n| n.target != vertex);
        }
    }

    /// Add an edge between two existing vertices
    ///
    /// Returns `Ok(true)` when the edge was inserted and `Ok(false)` when
    /// either endpoint is missing, in which case nothing changes. The weight
    /// is ignored for unweighted graphs.
    ///
    /// # Errors
    ///
    /// - [`GraphError::EdgeAlreadyExists`] if the same edge is already stored
    /// - [`GraphError::EdgeWeightConflict`] if the weighted pair exists with
    ///   another weight
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Option<Weight>) -> Result<bool> {
        if !self.has_vertex(from) || !self.has_vertex(to) {
            debug!(from, to, "skipping edge with a missing endpoint");
            return Ok(false);
        }

        let weight = if self.weighted { weight } else { None };
        let outgoing = &self.adjacency[from];

        if self.weighted {
            if outgoing.iter().any(|n| n.target == to && n.weight == weight) {
                return Err(GraphError::EdgeAlreadyExists {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight,
                });
            }
            if outgoing.iter().any(|n| n.target == to) {
                return Err(GraphError::EdgeWeightConflict {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        } else {
            let reverse_exists =
                !self.directed && self.adjacency[to].iter().any(|n| n.target == from);
            if outgoing.iter().any(|n| n.target == to) || reverse_exists {
                return Err(GraphError::EdgeAlreadyExists {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight: None,
                });
            }
        }

        self.push_entry(from, Neighbor::new(to, weight));
        if !self.directed && from != to {
            self.push_entry(to, Neighbor::new(from, weight));
        }

        debug!(from, to, ?weight, "added edge");
        Ok(true)
    }

    /// Remove the edge between two vertices
    ///
    /// Drops the first entry of `from` that targets `to`, and for undirected
    /// graphs also the first entry of `to` that targets `from`.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] when neither side had a matching entry.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<()> {
        let mut found = self.remove_first_entry(from, to);

        if !self.directed {
            found |= self.remove_first_entry(to, from);
        }

        if found {
            debug!(from, to, "removed edge");
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Number of entries in the vertex's neighbor list
    pub fn out_degree(&self, vertex: &str) -> Result<usize> {
        self.adjacency
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::VertexNotFound(vertex.to_string()))
    }

    /// Vertices that both `u` and `v` have an outgoing edge to
    ///
    /// Only directed graphs can produce matches; for undirected graphs the
    /// result is always empty. Results follow vertex insertion order.
    pub fn common_incoming_neighbors(&self, u: &str, v: &str) -> Result<Vec<Vertex>> {
        let from_u = self
            .adjacency
            .get(u)
            .ok_or_else(|| GraphError::VertexNotFound(u.to_string()))?;
        let from_v = self
            .adjacency
            .get(v)
            .ok_or_else(|| GraphError::VertexNotFound(v.to_string()))?;

        let common = self
            .adjacency
            .keys()
            .filter(|candidate| {
                self.directed
                    && from_u.iter().any(|n| &n.target == *candidate)
                    && from_v.iter().any(|n| &n.target == *candidate)
            })
            .cloned()
            .collect();

        Ok(common)
    }

    /// Remove the single edge of every vertex that currently has exactly one
    /// neighbor entry
    ///
    /// Leaves are collected once before any removal, so vertices that become
    /// leaves during the call are left alone. Returns the `(leaf, neighbor)`
    /// pairs whose edge was removed.
    pub fn prune_leaf_edges(&mut self) -> Vec<(Vertex, Vertex)> {
        let leaves: Vec<Vertex> = self
            .adjacency
            .iter()
            .filter(|(_, neighbors)| neighbors.len() == 1)
            .map(|(vertex, _)| vertex.clone())
            .collect();

        let mut removed = Vec::new();
        for leaf in leaves {
            // An earlier removal in this pass may already have emptied the list
            let Some(neighbor) = self
                .adjacency
                .get(&leaf)
                .and_then(|neighbors| neighbors.first())
                .map(|n| n.target.clone())
            else {
                debug!(leaf = %leaf, "leaf already detached");
                continue;
            };

            if self.remove_edge(&leaf, &neighbor).is_ok() {
                removed.push((leaf, neighbor));
            }
        }

        removed
    }

    fn push_entry(&mut self, vertex: &str, entry: Neighbor) {
        if let Some(neighbors) = self.adjacency.get_mut(vertex) {
            neighbors.push(entry);
        }
    }

    fn remove_first_entry(&mut self, vertex: &str, target: &str) -> bool {
        let Some(neighbors) = self.adjacency.get_mut(vertex) else {
            return false;
        };
        match neighbors.iter().position(|n| n.target == target) {
            Some(index) => {
                neighbors.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph:")?;
        writeln!(
            f,
            "Type: {}, {}",
            if self.directed { "Directed" } else { "Undirected" },
            if self.weighted { "Weighted" } else { "Unweighted" }
        )?;
        writeln!(f, "Adjacency list:")?;
        for (vertex, neighbors) in &self.adjacency {
            let listed: Vec<String> = neighbors.iter().map(ToString::to_string).collect();
            writeln!(f, "{}: {}", vertex, listed.join(", "))?;
        }
        Ok(())
    }
}
