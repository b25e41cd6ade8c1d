//! Node groups: sets of nodes that manage a subset of the total dataset.
//!
//! The cluster registry only talks to groups through the [`NodeGroup`]
//! capability trait. [`Group`] is the stock implementation, ordered by the
//! start of its partition range and then by id.

use crate::cluster::snapshot::GroupSnapshot;
use crate::error::{Error, Result};
use crate::types::{GroupId, Node};
use parking_lot::RwLock;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Contract the cluster registry relies on for a node group.
///
/// Implementations own their member nodes and are responsible for keeping
/// node ids unique within the group. Mutating methods take `&self`, so
/// implementations need interior mutability.
pub trait NodeGroup: Send + Sync + 'static {
    /// Transportable representation produced by [`NodeGroup::serialize`].
    type Snapshot: Serialize + Send + 'static;

    /// Stable group identifier.
    fn id(&self) -> &str;

    /// Natural ordering of groups within a cluster.
    fn order(&self, other: &Self) -> Ordering;

    /// Find a member node by id.
    fn get_node(&self, id: &str) -> Option<Arc<Node>>;

    /// Add a node to this group.
    fn add_node(&self, node: Arc<Node>) -> Result<()>;

    /// Remove a node from this group.
    fn remove_node(&self, node: &Arc<Node>) -> Result<()>;

    /// Number of member nodes.
    fn node_count(&self) -> usize;

    /// Render the group and its nodes into a transportable structure.
    fn serialize(&self) -> Self::Snapshot;
}

/// Stock node group implementation.
///
/// Nodes are kept sorted by id.
#[derive(Debug)]
pub struct Group {
    id: GroupId,
    /// First partition owned by this group. Primary ordering key.
    partition_start: u32,
    nodes: RwLock<Vec<Arc<Node>>>,
}

impl Group {
    /// Create an empty group.
    pub fn new(id: impl Into<GroupId>) -> Self {
        Self::with_partition_start(id, 0)
    }

    /// Create an empty group owning partitions from `partition_start`.
    pub fn with_partition_start(id: impl Into<GroupId>, partition_start: u32) -> Self {
        Self {
            id: id.into(),
            partition_start,
            nodes: RwLock::new(Vec::new()),
        }
    }

    /// Get the first partition owned by this group.
    pub fn partition_start(&self) -> u32 {
        self.partition_start
    }

    /// Get handles to all member nodes, sorted by id.
    pub fn nodes(&self) -> Vec<Arc<Node>> {
        self.nodes.read().clone()
    }
}

impl NodeGroup for Group {
    type Snapshot = GroupSnapshot;

    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self, other: &Self) -> Ordering {
        self.partition_start
            .cmp(&other.partition_start)
            .then_with(|| self.id.cmp(&other.id))
    }

    fn get_node(&self, id: &str) -> Option<Arc<Node>> {
        let nodes = self.nodes.read();
        nodes
            .binary_search_by(|n| n.id().cmp(id))
            .ok()
            .map(|index| nodes[index].clone())
    }

    fn add_node(&self, node: Arc<Node>) -> Result<()> {
        let mut nodes = self.nodes.write();
        match nodes.binary_search_by(|n| n.id().cmp(node.id())) {
            Ok(_) => Err(Error::DuplicateNode),
            Err(index) => {
                nodes.insert(index, node);
                Ok(())
            }
        }
    }

    fn remove_node(&self, node: &Arc<Node>) -> Result<()> {
        let mut nodes = self.nodes.write();
        let index = nodes
            .binary_search_by(|n| n.id().cmp(node.id()))
            .map_err(|_| Error::NodeNotFound)?;
        nodes.remove(index);
        Ok(())
    }

    fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    fn serialize(&self) -> GroupSnapshot {
        GroupSnapshot {
            id: self.id.clone(),
            partition_start: self.partition_start,
            nodes: self.nodes.read().iter().map(|n| (**n).clone()).collect(),
        }
    }
}
