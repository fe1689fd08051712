//! Core graph data structure.
//!
//! The RouteGraph wraps petgraph and adds an id index plus the per-query
//! search state. A graph is built for exactly one query and then dropped,
//! so the search state never outlives the query that produced it.

use orrery_core::Weight;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// A vertex in the route graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// The id the directory and edge source agree on.
    pub id: String,

    /// Human-readable label.
    pub name: String,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Mutable search record for one node during a query.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    /// Tentative distance from the query's source. Infinite until reached.
    pub distance: Weight,

    /// Best-known path from the source up to, not including, this node.
    pub path: Vec<NodeId>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            distance: Weight::INFINITY,
            path: Vec::new(),
        }
    }
}

/// The route graph for a single query.
#[derive(Debug, Default)]
pub struct RouteGraph {
    /// The underlying petgraph graph. Edge weights are route costs.
    pub(crate) graph: DiGraph<Waypoint, Weight>,

    /// Maps string IDs to graph node indexes.
    id_index: HashMap<String, NodeId>,

    /// Search state, keyed by node. Absent entries are unreached.
    state: HashMap<NodeId, NodeState>,
}

impl RouteGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a waypoint, or returns the existing index if its id is known.
    pub fn add_node(&mut self, node: Waypoint) -> NodeId {
        if let Some(index) = self.id_index.get(&node.id) {
            return *index;
        }

        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.id_index.insert(id, index);
        index
    }

    /// Adds a directed edge. A repeated edge keeps the lower weight.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                if let Some(existing) = self.graph.edge_weight_mut(edge) {
                    if weight < *existing {
                        *existing = weight;
                    }
                }
            }
            None => {
                self.graph.add_edge(from, to, weight);
            }
        }
    }

    /// Gets a node by its string ID.
    pub fn get_by_id(&self, id: &str) -> Option<&Waypoint> {
        let index = self.id_index.get(id)?;
        self.graph.node_weight(*index)
    }

    /// Gets a node by its graph index.
    pub fn get(&self, index: NodeId) -> Option<&Waypoint> {
        self.graph.node_weight(index)
    }

    /// Gets the node index for a string ID.
    pub fn get_index(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Outgoing edges of a node as (neighbor, weight) pairs, in the order
    /// the edges were first added.
    pub fn neighbors(&self, index: NodeId) -> Vec<(NodeId, Weight)> {
        // petgraph walks a node's outgoing list newest first.
        let mut neighbors: Vec<(NodeId, Weight)> = self
            .graph
            .edges(index)
            .map(|edge| (edge.target(), *edge.weight()))
            .collect();
        neighbors.reverse();
        neighbors
    }

    /// Weight of the direct edge between two nodes, if any.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<Weight> {
        let edge = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Tentative distance of a node in the current search.
    pub fn distance(&self, index: NodeId) -> Weight {
        self.state
            .get(&index)
            .map_or(Weight::INFINITY, |state| state.distance)
    }

    /// Search record of a node, if the current search reached it.
    pub fn state(&self, index: NodeId) -> Option<&NodeState> {
        self.state.get(&index)
    }

    pub(crate) fn state_mut(&mut self, index: NodeId) -> &mut NodeState {
        self.state.entry(index).or_default()
    }

    /// Forgets all search state.
    pub(crate) fn reset_state(&mut self) {
        self.state.clear();
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Waypoint> {
        self.graph.node_weights()
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }
}

/// Graph statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}
