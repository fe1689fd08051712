//! End-to-end route queries.
//!
//! The planner resolves names through the node directory, builds a fresh
//! graph from the edge source, runs the search and maps the resulting node
//! ids back to names. Nothing is cached between queries.

use crate::builder::{BuildError, GraphBuilder};
use crate::dijkstra::ShortestPath;
use crate::graph::{NodeId, RouteGraph};
use orrery_core::{EdgeSource, NodeDirectory, NodeRecord, SourceError, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum QueryError {
    /// A queried name is not in the node directory.
    #[error("Unknown node '{0}': both source and destination must be present")]
    Validation(String),

    /// The directory and the edge data disagree.
    #[error("Inconsistent route data: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<BuildError> for QueryError {
    fn from(err: BuildError) -> Self {
        QueryError::DataIntegrity(err.to_string())
    }
}

/// The answer to a route query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Names from the source up to, not including, the destination.
    pub labels: Vec<String>,

    /// Total weight to the destination. None when it is unreachable.
    pub distance: Option<Weight>,
}

impl Route {
    /// Whether the destination can be reached.
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

/// Answers shortest route queries over injected data sources.
pub struct RoutePlanner<E, D> {
    edges: E,
    directory: D,
}

impl<E: EdgeSource, D: NodeDirectory> RoutePlanner<E, D> {
    pub fn new(edges: E, directory: D) -> Self {
        Self { edges, directory }
    }

    /// Finds the shortest route between two named nodes.
    ///
    /// An unreachable destination is not an error; it yields a route with
    /// no labels and no distance.
    pub fn shortest_path(
        &self,
        source_name: &str,
        destination_name: &str,
    ) -> Result<Route, QueryError> {
        let source_id = self.resolve(source_name)?;
        let destination_id = self.resolve(destination_name)?;
        debug!(
            "Routing {} ({}) -> {} ({})",
            source_name, source_id, destination_name, destination_id
        );

        let known = self.directory.list_all()?;
        let mut graph = self.build_graph(&known)?;

        let source = Self::locate(&graph, &source_id)?;
        let destination = Self::locate(&graph, &destination_id)?;

        let path = graph.shortest_path(source, destination);
        let labels = Self::label(&graph, &path, &known)?;

        Ok(Route {
            labels,
            distance: path.distance,
        })
    }

    /// Builds a fresh graph from the current edge data.
    pub fn build_graph(&self, known: &[NodeRecord]) -> Result<RouteGraph, QueryError> {
        let mut builder = GraphBuilder::new();
        builder.add_known_nodes(known.iter().cloned());
        builder.add_edges(self.edges.list_edges()?)?;
        Ok(builder.build())
    }

    fn resolve(&self, name: &str) -> Result<String, QueryError> {
        self.directory
            .resolve_id_by_name(name)?
            .ok_or_else(|| QueryError::Validation(name.to_string()))
    }

    fn locate(graph: &RouteGraph, id: &str) -> Result<NodeId, QueryError> {
        graph.get_index(id).ok_or_else(|| {
            warn!("Node '{}' is in the directory but has no route data", id);
            QueryError::DataIntegrity(format!("missing route data for node '{}'", id))
        })
    }

    fn label(
        graph: &RouteGraph,
        path: &ShortestPath,
        known: &[NodeRecord],
    ) -> Result<Vec<String>, QueryError> {
        let names: HashMap<&str, &str> = known
            .iter()
            .map(|node| (node.id.as_str(), node.name.as_str()))
            .collect();

        path.nodes
            .iter()
            .map(|index| {
                let id = graph
                    .get(*index)
                    .map(|node| node.id.as_str())
                    .unwrap_or_default();
                names.get(id).map(|name| name.to_string()).ok_or_else(|| {
                    QueryError::DataIntegrity(format!("no name for node '{}'", id))
                })
            })
            .collect()
    }
}
