//! Topology change events.

use crate::types::{GroupId, NodeId};

/// Events published when the cluster topology changes.
///
/// Every event carries the topology version reached by the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEvent {
    /// A node group was registered.
    GroupAdded {
        /// The group's ID.
        group_id: GroupId,
        /// Topology version after the change.
        version: u64,
    },

    /// A node group was removed.
    GroupRemoved {
        /// The group's ID.
        group_id: GroupId,
        /// Topology version after the change.
        version: u64,
    },

    /// A node was added to a group.
    NodeAdded {
        /// The node's ID.
        node_id: NodeId,
        /// The owning group's ID.
        group_id: GroupId,
        /// Topology version after the change.
        version: u64,
    },

    /// A node was removed from a group.
    NodeRemoved {
        /// The node's ID.
        node_id: NodeId,
        /// The group the node was removed from.
        group_id: GroupId,
        /// Topology version after the change.
        version: u64,
    },

    /// A node was transferred from one group to another.
    NodeMoved {
        /// The node's ID.
        node_id: NodeId,
        /// The source group's ID.
        from: GroupId,
        /// The target group's ID.
        to: GroupId,
        /// Topology version after the change.
        version: u64,
    },
}

impl TopologyEvent {
    /// Get the node ID associated with this event, if any.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            TopologyEvent::GroupAdded { .. } | TopologyEvent::GroupRemoved { .. } => None,
            TopologyEvent::NodeAdded { node_id, .. }
            | TopologyEvent::NodeRemoved { node_id, .. }
            | TopologyEvent::NodeMoved { node_id, .. } => Some(node_id),
        }
    }

    /// Get the group ID associated with this event.
    ///
    /// For moves this is the target group.
    pub fn group_id(&self) -> &str {
        match self {
            TopologyEvent::GroupAdded { group_id, .. }
            | TopologyEvent::GroupRemoved { group_id, .. }
            | TopologyEvent::NodeAdded { group_id, .. }
            | TopologyEvent::NodeRemoved { group_id, .. } => group_id,
            TopologyEvent::NodeMoved { to, .. } => to,
        }
    }

    /// Get the topology version reached by this change.
    pub fn version(&self) -> u64 {
        match self {
            TopologyEvent::GroupAdded { version, .. }
            | TopologyEvent::GroupRemoved { version, .. }
            | TopologyEvent::NodeAdded { version, .. }
            | TopologyEvent::NodeRemoved { version, .. }
            | TopologyEvent::NodeMoved { version, .. } => *version,
        }
    }

    /// Check if this event changed the set of groups.
    pub fn is_group_change(&self) -> bool {
        matches!(
            self,
            TopologyEvent::GroupAdded { .. } | TopologyEvent::GroupRemoved { .. }
        )
    }
}

/// Listener for topology events.
pub trait TopologyEventListener: Send + Sync + 'static {
    /// Called after a topology change, outside the cluster lock.
    fn on_event(&self, event: TopologyEvent);
}

/// No-op event listener.
pub struct NoopEventListener;

impl TopologyEventListener for NoopEventListener {
    fn on_event(&self, _event: TopologyEvent) {}
}

/// Event listener that logs events.
pub struct LoggingEventListener;

impl TopologyEventListener for LoggingEventListener {
    fn on_event(&self, event: TopologyEvent) {
        match &event {
            TopologyEvent::GroupAdded { group_id, version } => {
                tracing::info!(%group_id, version, "Node group added");
            }
            TopologyEvent::GroupRemoved { group_id, version } => {
                tracing::info!(%group_id, version, "Node group removed");
            }
            TopologyEvent::NodeAdded {
                node_id,
                group_id,
                version,
            } => {
                tracing::info!(%node_id, %group_id, version, "Node added");
            }
            TopologyEvent::NodeRemoved {
                node_id,
                group_id,
                version,
            } => {
                tracing::info!(%node_id, %group_id, version, "Node removed");
            }
            TopologyEvent::NodeMoved {
                node_id,
                from,
                to,
                version,
            } => {
                tracing::info!(%node_id, %from, %to, version, "Node moved");
            }
        }
    }
}
