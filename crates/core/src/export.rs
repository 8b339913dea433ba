//! Conversion into `petgraph` structures and Graphviz DOT output
//!
//! Uses `petgraph::StableGraph` so node indices stay valid if callers prune
//! the exported graph further.

use std::collections::{HashMap, HashSet};

use petgraph::dot::{Config, Dot};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, EdgeType, Undirected};

use crate::graph::{Graph, Vertex, Weight};

impl Graph {
    /// Build a `StableGraph` holding the same vertices and edges
    ///
    /// Node weights are vertex labels and edge weights are the optional
    /// integer weights. For an undirected graph the two mirrored neighbor
    /// entries become a single edge; for a directed graph every entry is an
    /// edge.
    pub fn to_petgraph<Ty: EdgeType>(&self) -> StableGraph<Vertex, Option<Weight>, Ty> {
        let mut exported: StableGraph<Vertex, Option<Weight>, Ty> =
            StableGraph::with_capacity(self.vertex_count(), self.edge_entry_count());

        let index: HashMap<&str, NodeIndex> = self
            .vertices()
            .map(|vertex| (vertex, exported.add_node(vertex.to_string())))
            .collect();

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for (vertex, neighbors) in self.adjacency() {
            for neighbor in neighbors {
                let target = neighbor.target.as_str();
                if !self.directed {
                    let key = if vertex <= target {
                        (vertex, target)
                    } else {
                        (target, vertex)
                    };
                    if !seen.insert(key) {
                        continue;
                    }
                }
                if let (Some(&from), Some(&to)) = (index.get(vertex), index.get(target)) {
                    exported.add_edge(from, to, neighbor.weight);
                }
            }
        }

        exported
    }

    /// Render the graph as Graphviz DOT
    ///
    /// Edges carry their weight as label when the graph is weighted.
    pub fn to_dot(&self) -> String {
        if self.directed {
            self.render_dot::<Directed>()
        } else {
            self.render_dot::<Undirected>()
        }
    }

    fn render_dot<Ty: EdgeType>(&self) -> String {
        let labelled = self.to_petgraph::<Ty>().map(
            |_, vertex| vertex.clone(),
            |_, weight| weight.map(|w| w.to_string()).unwrap_or_default(),
        );

        if self.weighted {
            format!("{}", Dot::with_config(&labelled, &[]))
        } else {
            format!("{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
        }
    }
}
