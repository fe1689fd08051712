//! Orrery Core - Route records and data source contracts
//!
//! This crate holds the plain data that flows into the route graph and the
//! two contracts the graph side reads it through:
//!
//! - [`EdgeSource`] supplies every directed, weighted edge
//! - [`NodeDirectory`] maps node ids to human-readable names and back
//!
//! [`Dataset`] is the in-memory implementation of both, loaded from JSON.
//!
//! # Example
//!
//! ```
//! use orrery_core::{Dataset, EdgeRecord, NodeDirectory, NodeRecord};
//!
//! let dataset = Dataset::new(
//!     vec![NodeRecord::new("A", "Earth"), NodeRecord::new("B", "Moon")],
//!     vec![EdgeRecord::new("A", "B", 0.44)],
//! )
//! .unwrap();
//!
//! assert_eq!(dataset.resolve_id_by_name("Moon").unwrap(), Some("B".to_string()));
//! ```

mod dataset;
mod error;
mod record;
mod source;

pub use dataset::Dataset;
pub use error::{Result, SourceError};
pub use record::{EdgeRecord, NodeRecord, Weight};
pub use source::{EdgeSource, NodeDirectory};
