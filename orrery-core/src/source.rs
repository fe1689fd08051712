//! Contracts for the collaborators the route graph reads from.
//!
//! Both traits take `&self`: implementations are read-only snapshots for
//! the duration of a query.

use crate::error::Result;
use crate::record::{EdgeRecord, NodeRecord};
use std::sync::Arc;

/// Supplies the complete set of directed edges.
pub trait EdgeSource {
    fn list_edges(&self) -> Result<Vec<EdgeRecord>>;
}

/// Maps node ids to names and back.
pub trait NodeDirectory {
    /// Looks up a node id by its exact name.
    fn resolve_id_by_name(&self, name: &str) -> Result<Option<String>>;

    /// Lists every node the directory knows.
    fn list_all(&self) -> Result<Vec<NodeRecord>>;
}

impl<T: EdgeSource + ?Sized> EdgeSource for &T {
    fn list_edges(&self) -> Result<Vec<EdgeRecord>> {
        (**self).list_edges()
    }
}

impl<T: EdgeSource + ?Sized> EdgeSource for Arc<T> {
    fn list_edges(&self) -> Result<Vec<EdgeRecord>> {
        (**self).list_edges()
    }
}

impl<T: NodeDirectory + ?Sized> NodeDirectory for &T {
    fn resolve_id_by_name(&self, name: &str) -> Result<Option<String>> {
        (**self).resolve_id_by_name(name)
    }

    fn list_all(&self) -> Result<Vec<NodeRecord>> {
        (**self).list_all()
    }
}

impl<T: NodeDirectory + ?Sized> NodeDirectory for Arc<T> {
    fn resolve_id_by_name(&self, name: &str) -> Result<Option<String>> {
        (**self).resolve_id_by_name(name)
    }

    fn list_all(&self) -> Result<Vec<NodeRecord>> {
        (**self).list_all()
    }
}
