//! Point-in-time topology snapshots.
//!
//! Snapshots are assembled under the cluster lock and handed back to the
//! caller, who encodes them (JSON, MessagePack, ...) after the lock is gone.

use crate::types::{GroupId, Node};
use serde::{Deserialize, Serialize};

/// Snapshot of the whole cluster topology.
///
/// Serializes as `{"groups": [...]}` with one entry per registered group,
/// in the cluster's sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot<S> {
    /// Group representations in cluster order.
    pub groups: Vec<S>,
}

impl<S> ClusterSnapshot<S> {
    /// Number of groups captured.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no groups were captured.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Snapshot of a single [`Group`](crate::cluster::Group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// Group identifier.
    pub id: GroupId,
    /// First partition owned by the group.
    pub partition_start: u32,
    /// Member nodes, sorted by id.
    pub nodes: Vec<Node>,
}
