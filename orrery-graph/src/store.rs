//! Persistent route data backed by sled.
//!
//! Three trees hold one dataset:
//! - `nodes`: node id -> NodeRecord
//! - `names`: node name -> node id
//! - `edges`: big-endian sequence number -> EdgeRecord
//!
//! Values are bincode-encoded. Tree iteration is key-ordered, so nodes list
//! by id and edges in their original order.

use orrery_core::{Dataset, EdgeRecord, EdgeSource, NodeDirectory, NodeRecord, SourceError};
use serde::{Deserialize, Serialize};
use sled::transaction::{TransactionError, TransactionResult};
use sled::{Db, IVec, Transactional, Tree};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Transaction aborted")]
    Aborted,
}

impl From<StoreError> for SourceError {
    fn from(err: StoreError) -> Self {
        SourceError::Backend(err.to_string())
    }
}

/// Record counts of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub node_count: usize,
    pub edge_count: usize,
}

pub struct RouteStore {
    db: Db,
    nodes: Tree,
    names: Tree,
    edges: Tree,
}

impl RouteStore {
    /// Opens or creates a route store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let nodes = db.open_tree("nodes")?;
        let names = db.open_tree("names")?;
        let edges = db.open_tree("edges")?;
        Ok(Self {
            db,
            nodes,
            names,
            edges,
        })
    }

    /// Replaces the stored data with the given dataset.
    ///
    /// All three trees change in one transaction: on failure the previous
    /// data is left in place.
    pub fn replace(&self, dataset: &Dataset) -> Result<StoreStats, StoreError> {
        let mut nodes = Vec::with_capacity(dataset.nodes().len());
        let mut names = Vec::with_capacity(dataset.nodes().len());
        for node in dataset.nodes() {
            nodes.push((
                IVec::from(node.id.as_bytes()),
                IVec::from(bincode::serialize(node)?),
            ));
            names.push((
                IVec::from(node.name.as_bytes()),
                IVec::from(bincode::serialize(&node.id)?),
            ));
        }

        let mut edges = Vec::with_capacity(dataset.edges().len());
        for (seq, edge) in dataset.edges().iter().enumerate() {
            edges.push((
                IVec::from(&(seq as u64).to_be_bytes()[..]),
                IVec::from(bincode::serialize(edge)?),
            ));
        }

        let stale = [
            Self::keys(&self.nodes)?,
            Self::keys(&self.names)?,
            Self::keys(&self.edges)?,
        ];

        let trees = (&self.nodes, &self.names, &self.edges);
        let result: TransactionResult<()> = trees.transaction(|(node_tx, name_tx, edge_tx)| {
            for (tx, keys, fresh) in [
                (node_tx, &stale[0], &nodes),
                (name_tx, &stale[1], &names),
                (edge_tx, &stale[2], &edges),
            ] {
                for key in keys {
                    tx.remove(key.clone())?;
                }
                for (key, value) in fresh {
                    tx.insert(key.clone(), value.clone())?;
                }
            }
            Ok(())
        });
        result.map_err(|err| match err {
            TransactionError::Storage(err) => StoreError::Sled(err),
            TransactionError::Abort(()) => StoreError::Aborted,
        })?;
        self.db.flush()?;

        let stats = self.stats();
        info!(
            "Stored {} nodes and {} edges",
            stats.node_count, stats.edge_count
        );
        Ok(stats)
    }

    fn keys(tree: &Tree) -> Result<Vec<IVec>, StoreError> {
        Ok(tree.iter().keys().collect::<Result<_, _>>()?)
    }

    /// Clears all stored route data.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.nodes.clear()?;
        self.names.clear()?;
        self.edges.clear()?;
        self.db.flush()?;
        Ok(())
    }

    /// Returns record counts.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
        }
    }

    fn read_nodes(&self) -> Result<Vec<NodeRecord>, StoreError> {
        self.nodes
            .iter()
            .values()
            .map(|value| Ok(bincode::deserialize(&value?)?))
            .collect()
    }

    fn read_edges(&self) -> Result<Vec<EdgeRecord>, StoreError> {
        self.edges
            .iter()
            .values()
            .map(|value| Ok(bincode::deserialize(&value?)?))
            .collect()
    }

    fn read_id(&self, name: &str) -> Result<Option<String>, StoreError> {
        match self.names.get(name.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }
}

impl EdgeSource for RouteStore {
    fn list_edges(&self) -> orrery_core::Result<Vec<EdgeRecord>> {
        Ok(self.read_edges()?)
    }
}

impl NodeDirectory for RouteStore {
    fn resolve_id_by_name(&self, name: &str) -> orrery_core::Result<Option<String>> {
        Ok(self.read_id(name)?)
    }

    fn list_all(&self) -> orrery_core::Result<Vec<NodeRecord>> {
        Ok(self.read_nodes()?)
    }
}
