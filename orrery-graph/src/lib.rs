//! Orrery Graph - Shortest routes between named nodes
//!
//! This crate builds a directed, weighted route graph from the data
//! contracts in `orrery-core` and answers shortest route queries over it.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with an id index and a per-query
//! search record for each node. A fresh graph is built for every query:
//! - [`GraphBuilder`] turns node and edge records into a [`RouteGraph`]
//! - [`RouteGraph::shortest_path`] runs Dijkstra with early exit
//! - [`RoutePlanner`] resolves names, builds, searches and labels
//!
//! [`RouteStore`] persists route data in sled and serves it back through
//! the same contracts.
//!
//! # Example
//!
//! ```
//! use orrery_core::{Dataset, EdgeRecord, NodeRecord};
//! use orrery_graph::RoutePlanner;
//!
//! let data = Dataset::new(
//!     vec![NodeRecord::new("A", "Earth"), NodeRecord::new("B", "Moon")],
//!     vec![EdgeRecord::new("A", "B", 0.44)],
//! )
//! .unwrap();
//!
//! let planner = RoutePlanner::new(&data, &data);
//! let route = planner.shortest_path("Earth", "Moon").unwrap();
//!
//! assert_eq!(route.labels, vec!["Earth"]);
//! assert_eq!(route.distance, Some(0.44));
//! ```

mod builder;
mod dijkstra;
mod graph;
mod planner;
mod store;

pub use builder::{BuildError, GraphBuilder};
pub use dijkstra::ShortestPath;
pub use graph::{GraphStats, NodeId, NodeState, RouteGraph, Waypoint};
pub use planner::{QueryError, Route, RoutePlanner};
pub use store::{RouteStore, StoreError, StoreStats};
