//! Cluster topology: node groups, the registry that orders them, snapshots
//! and change events.

pub mod events;
pub mod group;
pub mod registry;
pub mod snapshot;

pub use events::{LoggingEventListener, NoopEventListener, TopologyEvent, TopologyEventListener};
pub use group::{Group, NodeGroup};
pub use registry::Cluster;
pub use snapshot::{ClusterSnapshot, GroupSnapshot};
