//! Error types for the topology registry.

use thiserror::Error;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by cluster and node group operations.
///
/// All variants are validation or lookup failures. They are returned
/// immediately and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node group argument was absent where one is required.
    #[error("node group required")]
    GroupRequired,

    /// The referenced node group is not registered in the cluster.
    #[error("node group not found")]
    GroupNotFound,

    /// A node group with the same id is already registered.
    ///
    /// Only raised when duplicate group rejection is enabled.
    #[error("duplicate node group already exists")]
    DuplicateGroup,

    /// A node with the same id already exists somewhere in the cluster.
    #[error("duplicate node already exists")]
    DuplicateNode,

    /// A node argument was absent where one is required.
    #[error("node required")]
    NodeRequired,

    /// The referenced node does not exist in the cluster.
    #[error("node not found")]
    NodeNotFound,

    /// Group-specific failure raised by a [`NodeGroup`](crate::cluster::NodeGroup)
    /// implementation.
    #[error("node group error: {0}")]
    Group(String),
}
