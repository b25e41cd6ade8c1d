//! Core types used throughout the topology registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier in the cluster.
pub type NodeId = String;

/// Node group identifier in the cluster.
pub type GroupId = String;

/// A single addressable server in the cluster.
///
/// A node belongs to at most one group at a time. Moving it between groups
/// is always an explicit remove followed by an add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    id: NodeId,
    /// Host the node listens on.
    host: String,
    /// Port the node listens on.
    port: u16,
}

impl Node {
    /// Create a node with no address information.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            host: String::new(),
            port: 0,
        }
    }

    /// Create a node reachable at `host:port`.
    pub fn with_address(id: impl Into<NodeId>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
            port,
        }
    }

    /// Get the node ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}@{}:{}", self.id, self.host, self.port)
        }
    }
}
