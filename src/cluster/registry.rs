//! The cluster topology registry.
//!
//! A cluster is made up of node groups, each a set of servers managing a
//! subset of the total dataset. The registry is the single authority on
//! which groups exist and which nodes belong to them. Every operation takes
//! one mutex for its full duration; snapshots hold it only while group
//! representations are collected.

use crate::cluster::events::{LoggingEventListener, TopologyEvent, TopologyEventListener};
use crate::cluster::group::{Group, NodeGroup};
use crate::cluster::snapshot::ClusterSnapshot;
use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use crate::types::Node;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// State guarded by the cluster lock.
struct Topology<G> {
    /// Registered groups, sorted by [`NodeGroup::order`].
    groups: Vec<Arc<G>>,
    /// Incremented on every successful change.
    version: u64,
}

impl<G: NodeGroup> Topology<G> {
    fn group_by_id(&self, id: &str) -> Option<&Arc<G>> {
        self.groups.iter().find(|g| g.id() == id)
    }

    fn node_by_id(&self, id: &str) -> Option<(Arc<Node>, Arc<G>)> {
        self.groups
            .iter()
            .find_map(|g| g.get_node(id).map(|node| (node, g.clone())))
    }

    fn bump_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

/// Thread-safe registry of node groups and their nodes.
///
/// Share it as `Arc<Cluster<G>>`. Topology events are published to
/// listeners and subscribers after the lock has been released.
pub struct Cluster<G: NodeGroup = Group> {
    config: ClusterConfig,

    /// Groups and version, guarded by a single lock.
    topology: Mutex<Topology<G>>,

    /// Event listeners.
    listeners: RwLock<Vec<Arc<dyn TopologyEventListener>>>,

    /// Channel subscribers. Closed receivers are dropped on publish.
    subscribers: Mutex<Vec<mpsc::UnboundedSender<TopologyEvent>>>,
}

impl<G: NodeGroup> Cluster<G> {
    /// Create an empty cluster.
    pub fn new(config: ClusterConfig) -> Self {
        let mut listeners: Vec<Arc<dyn TopologyEventListener>> = Vec::new();
        if config.event_logging {
            listeners.push(Arc::new(LoggingEventListener));
        }

        Self {
            config,
            topology: Mutex::new(Topology {
                groups: Vec::new(),
                version: 1,
            }),
            listeners: RwLock::new(listeners),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Get the current topology version.
    pub fn version(&self) -> u64 {
        self.topology.lock().version
    }

    // ==================== Events ====================

    /// Add an event listener.
    pub fn add_listener(&self, listener: Arc<dyn TopologyEventListener>) {
        self.listeners.write().push(listener);
    }

    /// Subscribe to topology events.
    ///
    /// Events are sent after the topology lock is released, so changes made
    /// concurrently on different threads can arrive out of order. Order them
    /// by [`TopologyEvent::version`] when sequence matters.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<TopologyEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Notify listeners and subscribers. Must be called without the
    /// topology lock held.
    fn publish(&self, event: TopologyEvent) {
        // Listeners may register more listeners or mutate the cluster.
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener.on_event(event.clone());
        }

        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ==================== Node Groups ====================

    /// Find a group in the cluster by id.
    pub fn get_node_group(&self, id: &str) -> Option<Arc<G>> {
        self.topology.lock().group_by_id(id).cloned()
    }

    /// Get handles to all groups in cluster order.
    pub fn node_groups(&self) -> Vec<Arc<G>> {
        self.topology.lock().groups.clone()
    }

    /// Get the number of registered groups.
    pub fn group_count(&self) -> usize {
        self.topology.lock().groups.len()
    }

    /// Check if no groups are registered.
    pub fn is_empty(&self) -> bool {
        self.topology.lock().groups.is_empty()
    }

    /// Add a group to the cluster.
    ///
    /// The group list is re-sorted after insertion. Group ids are not
    /// checked for uniqueness unless
    /// [`ClusterConfig::reject_duplicate_groups`] is set.
    pub fn add_node_group(&self, group: Arc<G>) -> Result<()> {
        let event = {
            let mut topology = self.topology.lock();

            if self.config.reject_duplicate_groups && topology.group_by_id(group.id()).is_some() {
                warn!(
                    cluster = %self.config.name,
                    group_id = group.id(),
                    "Rejected duplicate node group"
                );
                return Err(Error::DuplicateGroup);
            }

            topology.groups.push(group.clone());
            topology.groups.sort_by(|a, b| a.order(b));
            let version = topology.bump_version();

            debug!(
                cluster = %self.config.name,
                group_id = group.id(),
                version,
                "Node group added"
            );

            TopologyEvent::GroupAdded {
                group_id: group.id().to_string(),
                version,
            }
        };

        self.publish(event);
        Ok(())
    }

    /// Remove a group from the cluster.
    ///
    /// Matches on handle identity, not on id: only the exact registered
    /// instance is removed.
    pub fn remove_node_group(&self, group: Option<&Arc<G>>) -> Result<()> {
        let event = {
            let mut topology = self.topology.lock();

            let group = group.ok_or(Error::GroupRequired)?;
            let index = topology
                .groups
                .iter()
                .position(|g| Arc::ptr_eq(g, group))
                .ok_or(Error::GroupNotFound)?;

            let removed = topology.groups.remove(index);
            let version = topology.bump_version();

            debug!(
                cluster = %self.config.name,
                group_id = removed.id(),
                version,
                "Node group removed"
            );

            TopologyEvent::GroupRemoved {
                group_id: removed.id().to_string(),
                version,
            }
        };

        self.publish(event);
        Ok(())
    }

    // ==================== Nodes ====================

    /// Retrieve a node and its owning group by node id.
    pub fn get_node(&self, id: &str) -> Option<(Arc<Node>, Arc<G>)> {
        self.topology.lock().node_by_id(id)
    }

    /// Get the total number of nodes across all groups.
    pub fn node_count(&self) -> usize {
        self.topology
            .lock()
            .groups
            .iter()
            .map(|g| g.node_count())
            .sum()
    }

    /// Add a node to an existing group in the cluster.
    ///
    /// The group is re-resolved by id so the node always lands on the
    /// registered instance, even if `group` is a detached copy. Errors from
    /// the group itself are returned unchanged.
    pub fn add_node(&self, node: Option<Arc<Node>>, group: Option<&Arc<G>>) -> Result<()> {
        let event = {
            let mut topology = self.topology.lock();

            let node = node.ok_or(Error::NodeRequired)?;

            if topology.node_by_id(node.id()).is_some() {
                return Err(Error::DuplicateNode);
            }

            let group = group.ok_or(Error::GroupRequired)?;
            let group = topology
                .group_by_id(group.id())
                .cloned()
                .ok_or(Error::GroupNotFound)?;

            group.add_node(node.clone())?;
            let version = topology.bump_version();

            debug!(
                cluster = %self.config.name,
                node_id = node.id(),
                group_id = group.id(),
                version,
                "Node added"
            );

            TopologyEvent::NodeAdded {
                node_id: node.id().to_string(),
                group_id: group.id().to_string(),
                version,
            }
        };

        self.publish(event);
        Ok(())
    }

    /// Remove a node from whichever group owns it.
    pub fn remove_node(&self, node: Option<&Arc<Node>>) -> Result<()> {
        let event = {
            let mut topology = self.topology.lock();

            let node = node.ok_or(Error::NodeRequired)?;
            let (node, group) = topology
                .node_by_id(node.id())
                .ok_or(Error::NodeNotFound)?;

            group.remove_node(&node)?;
            let version = topology.bump_version();

            debug!(
                cluster = %self.config.name,
                node_id = node.id(),
                group_id = group.id(),
                version,
                "Node removed"
            );

            TopologyEvent::NodeRemoved {
                node_id: node.id().to_string(),
                group_id: group.id().to_string(),
                version,
            }
        };

        self.publish(event);
        Ok(())
    }

    /// Transfer a node to another group.
    ///
    /// Runs the remove-then-add sequence under one lock acquisition. Moving
    /// a node into the group that already owns it is a no-op. If the target
    /// group rejects the node, it is put back into its source group. If the
    /// source refuses it too, the node has left the topology: the version is
    /// bumped and a `NodeRemoved` event is published before the target's
    /// error is returned.
    pub fn move_node(&self, node_id: &str, target: Option<&Arc<G>>) -> Result<()> {
        let event = {
            let mut topology = self.topology.lock();

            let target = target.ok_or(Error::GroupRequired)?;
            let (node, source) = topology.node_by_id(node_id).ok_or(Error::NodeNotFound)?;
            let target = topology
                .group_by_id(target.id())
                .cloned()
                .ok_or(Error::GroupNotFound)?;

            if Arc::ptr_eq(&source, &target) {
                return Ok(());
            }

            source.remove_node(&node)?;
            if let Err(err) = target.add_node(node.clone()) {
                if let Err(restore_err) = source.add_node(node.clone()) {
                    let version = topology.bump_version();
                    drop(topology);

                    warn!(
                        cluster = %self.config.name,
                        node_id,
                        group_id = source.id(),
                        version,
                        error = %restore_err,
                        "Failed to restore node after rejected move, node dropped"
                    );

                    self.publish(TopologyEvent::NodeRemoved {
                        node_id: node_id.to_string(),
                        group_id: source.id().to_string(),
                        version,
                    });
                }
                return Err(err);
            }
            let version = topology.bump_version();

            debug!(
                cluster = %self.config.name,
                node_id,
                from = source.id(),
                to = target.id(),
                version,
                "Node moved"
            );

            TopologyEvent::NodeMoved {
                node_id: node_id.to_string(),
                from: source.id().to_string(),
                to: target.id().to_string(),
                version,
            }
        };

        self.publish(event);
        Ok(())
    }

    // ==================== Serialization ====================

    /// Capture the topology as a structure that can be encoded outside the
    /// cluster lock.
    pub fn serialize(&self) -> ClusterSnapshot<G::Snapshot> {
        let (groups, version) = {
            let topology = self.topology.lock();
            let groups: Vec<_> = topology.groups.iter().map(|g| g.serialize()).collect();
            (groups, topology.version)
        };

        debug!(
            cluster = %self.config.name,
            groups = groups.len(),
            version,
            "Topology snapshot taken"
        );

        ClusterSnapshot { groups }
    }
}

impl<G: NodeGroup> Default for Cluster<G> {
    fn default() -> Self {
        Self::new(ClusterConfig::default())
    }
}

impl<G: NodeGroup> std::fmt::Debug for Cluster<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let topology = self.topology.lock();
        f.debug_struct("Cluster")
            .field("name", &self.config.name)
            .field("group_count", &topology.groups.len())
            .field("version", &topology.version)
            .finish()
    }
}
