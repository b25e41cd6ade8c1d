//! Thread-safe registry of cluster topology.
//!
//! This crate tracks which node groups make up a distributed data cluster
//! and which nodes belong to each group. Routing and replication code
//! consults it to decide which node owns which partition.
//!
//! - **Node groups** are kept sorted by their natural ordering key
//! - **Node ids** are unique across the whole cluster
//! - **Snapshots** are assembled under the lock and encoded outside it
//!
//! # Example
//!
//! ```rust
//! use clustermap::{Cluster, ClusterConfig, Group, Node};
//! use std::sync::Arc;
//!
//! # fn main() -> clustermap::Result<()> {
//! let cluster: Cluster = Cluster::new(ClusterConfig::new("sky"));
//!
//! let group = Arc::new(Group::new("g1"));
//! cluster.add_node_group(group.clone())?;
//! cluster.add_node(Some(Arc::new(Node::new("n1"))), Some(&group))?;
//!
//! let (node, owner) = cluster.get_node("n1").expect("node registered");
//! assert_eq!(node.id(), "n1");
//! assert!(Arc::ptr_eq(&owner, &group));
//!
//! // The lock is already released here.
//! let snapshot = cluster.serialize();
//! assert_eq!(snapshot.groups.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │         Routing / Replication Layer          │
//! └─────────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────────┐
//! │              Cluster (one mutex)             │
//! │  • get/add/remove node group                 │
//! │  • get/add/remove/move node                  │
//! │  • serialize() -> ClusterSnapshot            │
//! └─────────────────────────────────────────────┘
//!          │                          │
//!          ▼                          ▼
//!   ┌─────────────┐          ┌────────────────┐
//!   │  NodeGroup  │ ...      │ TopologyEvent  │
//!   │  (nodes)    │          │ listeners      │
//!   └─────────────┘          └────────────────┘
//! ```

pub mod cluster;
pub mod config;
pub mod error;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use cluster::{
    Cluster, ClusterSnapshot, Group, GroupSnapshot, LoggingEventListener, NodeGroup,
    NoopEventListener, TopologyEvent, TopologyEventListener,
};
pub use config::ClusterConfig;
pub use error::{Error, Result};
pub use types::{GroupId, Node, NodeId};
