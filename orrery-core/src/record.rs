//! Plain records exchanged with data sources.

use serde::{Deserialize, Serialize};

/// Edge weight. Must be non-negative; the route engine does not check.
pub type Weight = f64;

/// A node as the directory knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Opaque unique identifier.
    pub id: String,

    /// Human-readable label, unique within a directory.
    pub name: String,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A directed, weighted edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: Weight,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: Weight) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}
