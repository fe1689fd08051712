//! Graph builder for constructing the route graph from source records.
//!
//! The builder takes the directory's node records and the edge source's
//! edge list. Nodes enter the graph only as edge endpoints, so a node the
//! directory knows but no edge touches is absent from the built graph.

use crate::graph::{NodeId, RouteGraph, Waypoint};
use orrery_core::{EdgeRecord, NodeRecord};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// An edge names a node id that is not in the known node set.
    #[error("Edge {from} -> {to} references unknown node '{id}'")]
    UnknownNode { from: String, to: String, id: String },
}

/// Builds a RouteGraph from node and edge records.
///
/// The builder handles the two-pass process:
/// 1. Register every node the directory knows
/// 2. Add edges, creating graph nodes for their endpoints
pub struct GraphBuilder {
    graph: RouteGraph,
    /// Maps known node ids to their labels.
    known: HashMap<String, String>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder with no known nodes.
    pub fn new() -> Self {
        Self {
            graph: RouteGraph::new(),
            known: HashMap::new(),
        }
    }

    /// Registers nodes that edges may reference.
    pub fn add_known_nodes(&mut self, nodes: impl IntoIterator<Item = NodeRecord>) {
        for node in nodes {
            self.known.insert(node.id, node.name);
        }
    }

    /// Adds directed edges to the graph.
    ///
    /// Fails on the first edge whose endpoint is not a known node.
    pub fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = EdgeRecord>,
    ) -> Result<(), BuildError> {
        for edge in edges {
            let from = self.endpoint(&edge, &edge.source)?;
            let to = self.endpoint(&edge, &edge.target)?;
            self.graph.add_edge(from, to, edge.weight);
        }
        Ok(())
    }

    fn endpoint(&mut self, edge: &EdgeRecord, id: &str) -> Result<NodeId, BuildError> {
        if let Some(index) = self.graph.get_index(id) {
            return Ok(index);
        }

        match self.known.get(id) {
            Some(name) => Ok(self.graph.add_node(Waypoint::new(id, name.clone()))),
            None => {
                warn!(
                    "Rejecting edge {} -> {}: unknown node '{}'",
                    edge.source, edge.target, id
                );
                Err(BuildError::UnknownNode {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    id: id.to_string(),
                })
            }
        }
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> RouteGraph {
        debug!(
            "Built route graph: {} nodes, {} edges ({} known)",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.known.len()
        );
        self.graph
    }
}
