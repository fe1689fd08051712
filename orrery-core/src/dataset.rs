//! In-memory route data.
//!
//! A dataset file is a JSON document of the form
//!
//! ```json
//! {
//!   "nodes": [{ "id": "A", "name": "Earth" }],
//!   "edges": [{ "source": "A", "target": "B", "weight": 0.44 }]
//! }
//! ```
//!
//! Ids and names must both be unique. Edges are not checked against the
//! node list here; the graph builder reports those as integrity faults.

use crate::error::{Result, SourceError};
use crate::record::{EdgeRecord, NodeRecord};
use crate::source::{EdgeSource, NodeDirectory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Nodes and edges held in memory. Implements both data contracts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    nodes: Vec<NodeRecord>,

    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

impl Dataset {
    /// Creates a dataset, rejecting duplicate ids or names.
    pub fn new(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Result<Self> {
        let dataset = Self { nodes, edges };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parses a dataset from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reads and parses a dataset file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let dataset = Self::from_json(&content)?;
        debug!(
            "Loaded dataset {} ({} nodes, {} edges)",
            path.display(),
            dataset.nodes.len(),
            dataset.edges.len()
        );
        Ok(dataset)
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(SourceError::Invalid(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            if !names.insert(node.name.as_str()) {
                return Err(SourceError::Invalid(format!(
                    "duplicate node name '{}'",
                    node.name
                )));
            }
        }

        Ok(())
    }
}

impl EdgeSource for Dataset {
    fn list_edges(&self) -> Result<Vec<EdgeRecord>> {
        Ok(self.edges.clone())
    }
}

impl NodeDirectory for Dataset {
    fn resolve_id_by_name(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .nodes
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.id.clone()))
    }

    fn list_all(&self) -> Result<Vec<NodeRecord>> {
        Ok(self.nodes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLAR: &str = r#"{
        "nodes": [
            { "id": "A", "name": "Earth" },
            { "id": "B", "name": "Moon" }
        ],
        "edges": [
            { "source": "A", "target": "B", "weight": 0.44 }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let dataset = Dataset::from_json(SOLAR).unwrap();

        assert_eq!(dataset.nodes().len(), 2);
        assert_eq!(dataset.edges().len(), 1);
        assert_eq!(dataset.edges()[0], EdgeRecord::new("A", "B", 0.44));
    }

    #[test]
    fn test_resolve_by_name_is_exact() {
        let dataset = Dataset::from_json(SOLAR).unwrap();

        assert_eq!(
            dataset.resolve_id_by_name("Earth").unwrap(),
            Some("A".to_string())
        );
        assert_eq!(dataset.resolve_id_by_name("earth").unwrap(), None);
        assert_eq!(dataset.resolve_id_by_name("Mars").unwrap(), None);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Dataset::new(
            vec![NodeRecord::new("A", "Earth"), NodeRecord::new("A", "Moon")],
            vec![],
        );
        assert!(matches!(result, Err(SourceError::Invalid(_))));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Dataset::new(
            vec![NodeRecord::new("A", "Earth"), NodeRecord::new("B", "Earth")],
            vec![],
        );
        assert!(matches!(result, Err(SourceError::Invalid(_))));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let dataset = Dataset::from_json("{}").unwrap();
        assert!(dataset.nodes().is_empty());
        assert!(dataset.list_edges().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let result = Dataset::from_json("{ not json");
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        fs::write(&path, SOLAR).unwrap();

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dataset::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
