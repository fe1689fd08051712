//! Single-source shortest path search with early exit.
//!
//! Dijkstra's relaxation over the route graph. The search stops as soon as
//! the destination is selected as the closest unsettled node, at which point
//! its distance is final. Candidates are picked by a linear scan; ties go to
//! the node that became a candidate first. Neighbors are visited in the
//! order their edges were added, so among equal distances the earlier edge
//! wins.
//!
//! Weights must be non-negative. This is not checked.

use crate::graph::{NodeId, RouteGraph};
use orrery_core::Weight;
use std::collections::HashSet;
use tracing::debug;

/// Result of a shortest path search.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Nodes from the source up to, not including, the destination.
    pub nodes: Vec<NodeId>,

    /// Total weight to the destination. None when it is unreachable.
    pub distance: Option<Weight>,
}

impl ShortestPath {
    fn unreachable() -> Self {
        Self {
            nodes: Vec::new(),
            distance: None,
        }
    }

    /// Whether the destination was reached.
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

impl RouteGraph {
    /// Finds the shortest path from `source` to `destination`.
    ///
    /// Any state left by a previous search on this graph is discarded.
    /// A query from a node to itself yields an empty path at distance zero.
    pub fn shortest_path(&mut self, source: NodeId, destination: NodeId) -> ShortestPath {
        self.reset_state();
        self.state_mut(source).distance = 0.0;

        let mut unsettled = vec![source];
        let mut settled = HashSet::new();

        while let Some(current) = self.take_closest(&mut unsettled) {
            if current == destination {
                let state = self.state_mut(current);
                debug!(
                    "Destination settled at {} after {} nodes",
                    state.distance,
                    settled.len()
                );
                return ShortestPath {
                    nodes: state.path.clone(),
                    distance: Some(state.distance),
                };
            }

            let (distance, prefix) = {
                let state = self.state_mut(current);
                let mut prefix = state.path.clone();
                prefix.push(current);
                (state.distance, prefix)
            };

            for (neighbor, weight) in self.neighbors(current) {
                if neighbor == current || settled.contains(&neighbor) {
                    continue;
                }

                let candidate = distance + weight;
                let state = self.state_mut(neighbor);
                if candidate < state.distance {
                    state.distance = candidate;
                    state.path = prefix.clone();
                }

                if !unsettled.contains(&neighbor) {
                    unsettled.push(neighbor);
                }
            }

            settled.insert(current);
        }

        debug!("Destination unreachable after {} nodes", settled.len());
        ShortestPath::unreachable()
    }

    /// Removes and returns the unsettled node with the smallest distance.
    fn take_closest(&self, unsettled: &mut Vec<NodeId>) -> Option<NodeId> {
        let mut closest: Option<(usize, Weight)> = None;

        for (position, index) in unsettled.iter().enumerate() {
            let distance = self.distance(*index);
            match closest {
                Some((_, best)) if distance < best => closest = Some((position, distance)),
                None => closest = Some((position, distance)),
                _ => {}
            }
        }

        closest.map(|(position, _)| unsettled.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Waypoint;

    /// Builds a graph over the given ids and edges.
    fn graph_with(ids: &[&str], edges: &[(&str, &str, Weight)]) -> RouteGraph {
        let mut graph = RouteGraph::new();
        for id in ids {
            graph.add_node(Waypoint::new(*id, id.to_lowercase()));
        }
        for (from, to, weight) in edges {
            let from = graph.get_index(from).unwrap();
            let to = graph.get_index(to).unwrap();
            graph.add_edge(from, to, *weight);
        }
        graph
    }

    fn ids(graph: &RouteGraph, path: &ShortestPath) -> Vec<String> {
        path.nodes
            .iter()
            .map(|index| graph.get(*index).unwrap().id.clone())
            .collect()
    }

    /// Sum of edge weights along the prefix plus the final hop.
    fn path_weight(graph: &RouteGraph, path: &ShortestPath, destination: NodeId) -> Weight {
        let mut hops: Vec<NodeId> = path.nodes.clone();
        hops.push(destination);
        hops.windows(2)
            .map(|pair| graph.edge_weight(pair[0], pair[1]).unwrap())
            .sum()
    }

    #[test]
    fn test_prefers_cheaper_indirect_route() {
        let mut graph = graph_with(
            &["A", "B", "C"],
            &[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)],
        );
        let a = graph.get_index("A").unwrap();
        let c = graph.get_index("C").unwrap();

        let path = graph.shortest_path(a, c);

        assert_eq!(ids(&graph, &path), vec!["A", "B"]);
        assert_eq!(path.distance, Some(3.0));
    }

    #[test]
    fn test_direct_edge_order_does_not_matter() {
        // Same graph as above with the direct edge inserted first.
        let mut graph = graph_with(
            &["A", "B", "C"],
            &[("A", "C", 4.0), ("A", "B", 1.0), ("B", "C", 2.0)],
        );
        let a = graph.get_index("A").unwrap();
        let c = graph.get_index("C").unwrap();

        let path = graph.shortest_path(a, c);

        assert_eq!(ids(&graph, &path), vec!["A", "B"]);
        assert_eq!(path.distance, Some(3.0));
    }

    #[test]
    fn test_unreachable_against_direction() {
        let mut graph = graph_with(&["A", "B"], &[("A", "B", 5.0)]);
        let a = graph.get_index("A").unwrap();
        let b = graph.get_index("B").unwrap();

        let path = graph.shortest_path(b, a);

        assert!(path.nodes.is_empty());
        assert!(!path.is_reachable());
    }

    #[test]
    fn test_source_equals_destination() {
        let mut graph = graph_with(&["A", "B"], &[("A", "B", 1.0), ("B", "A", 1.0)]);
        let a = graph.get_index("A").unwrap();

        let path = graph.shortest_path(a, a);

        assert!(path.nodes.is_empty());
        assert_eq!(path.distance, Some(0.0));
    }

    #[test]
    fn test_self_loop_is_ignored() {
        let mut graph = graph_with(&["A", "B"], &[("A", "A", 0.0), ("A", "B", 2.0)]);
        let a = graph.get_index("A").unwrap();
        let b = graph.get_index("B").unwrap();

        let path = graph.shortest_path(a, b);

        assert_eq!(ids(&graph, &path), vec!["A"]);
        assert_eq!(path.distance, Some(2.0));
    }

    #[test]
    fn test_disconnected_component() {
        let mut graph = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "B", 1.0), ("C", "D", 1.0)],
        );
        let a = graph.get_index("A").unwrap();
        let d = graph.get_index("D").unwrap();

        let path = graph.shortest_path(a, d);

        assert_eq!(path, ShortestPath::unreachable());
        assert_eq!(graph.distance(a), 0.0);
    }

    #[test]
    fn test_cycles_terminate() {
        let mut graph = graph_with(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", 1.0),
                ("B", "C", 1.0),
                ("C", "A", 1.0),
                ("C", "B", 0.5),
            ],
        );
        let a = graph.get_index("A").unwrap();
        let d = graph.get_index("D").unwrap();

        assert!(!graph.shortest_path(a, d).is_reachable());
    }

    #[test]
    fn test_source_distance_is_zero_and_path_is_additive() {
        let mut graph = graph_with(
            &["A", "B", "C", "D", "E"],
            &[
                ("A", "B", 7.0),
                ("A", "C", 9.0),
                ("A", "E", 14.0),
                ("B", "C", 10.0),
                ("B", "D", 15.0),
                ("C", "D", 11.0),
                ("C", "E", 2.0),
                ("D", "E", 6.0),
                ("E", "D", 9.0),
            ],
        );
        let a = graph.get_index("A").unwrap();
        let d = graph.get_index("D").unwrap();

        let path = graph.shortest_path(a, d);

        assert_eq!(graph.distance(a), 0.0);
        assert_eq!(ids(&graph, &path), vec!["A", "C"]);
        assert_eq!(path.distance, Some(20.0));
        assert_eq!(path_weight(&graph, &path, d), 20.0);
    }

    #[test]
    fn test_ties_resolve_to_first_candidate() {
        let mut graph = graph_with(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", 1.0),
                ("A", "C", 1.0),
                ("B", "D", 1.0),
                ("C", "D", 1.0),
            ],
        );
        let a = graph.get_index("A").unwrap();
        let d = graph.get_index("D").unwrap();

        let first = graph.shortest_path(a, d);
        let second = graph.shortest_path(a, d);

        assert_eq!(first, second);
        assert_eq!(ids(&graph, &first), vec!["A", "B"]);
        assert_eq!(first.distance, Some(2.0));
    }

    #[test]
    fn test_ties_follow_edge_insertion_order() {
        // Same shape as above with A's edges added in the other order.
        let mut graph = graph_with(
            &["A", "B", "C", "D"],
            &[
                ("A", "C", 1.0),
                ("A", "B", 1.0),
                ("B", "D", 1.0),
                ("C", "D", 1.0),
            ],
        );
        let a = graph.get_index("A").unwrap();
        let d = graph.get_index("D").unwrap();

        let path = graph.shortest_path(a, d);

        assert_eq!(ids(&graph, &path), vec!["A", "C"]);
        assert_eq!(path.distance, Some(2.0));
    }

    #[test]
    fn test_repeated_search_resets_state() {
        let mut graph = graph_with(
            &["A", "B", "C"],
            &[("A", "B", 1.0), ("B", "C", 1.0)],
        );
        let a = graph.get_index("A").unwrap();
        let b = graph.get_index("B").unwrap();
        let c = graph.get_index("C").unwrap();

        graph.shortest_path(a, c);
        let path = graph.shortest_path(b, c);

        assert_eq!(ids(&graph, &path), vec!["B"]);
        assert_eq!(path.distance, Some(1.0));
        assert!(graph.distance(a).is_infinite());
    }
}
