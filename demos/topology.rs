//! Build a small topology and print its snapshot as JSON.

use clustermap::{Cluster, ClusterConfig, Group, LoggingEventListener, Node, NodeGroup};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("clustermap=debug,info")
        .init();

    let cluster: Cluster = Cluster::new(ClusterConfig::new("demo"));
    cluster.add_listener(Arc::new(LoggingEventListener));

    // Two groups, each owning half of a 256-partition keyspace.
    let upper = Arc::new(Group::with_partition_start("upper", 128));
    let lower = Arc::new(Group::with_partition_start("lower", 0));
    cluster.add_node_group(upper.clone())?;
    cluster.add_node_group(lower.clone())?;

    cluster.add_node(Some(Arc::new(Node::with_address("n1", "10.0.0.1", 8585))), Some(&lower))?;
    cluster.add_node(Some(Arc::new(Node::with_address("n2", "10.0.0.2", 8585))), Some(&lower))?;
    cluster.add_node(Some(Arc::new(Node::with_address("n3", "10.0.0.3", 8585))), Some(&upper))?;

    // Rebalance one node by hand.
    cluster.move_node("n2", Some(&upper))?;

    if let Some((node, group)) = cluster.get_node("n2") {
        println!("{} is owned by {}", node, group.id());
    }

    // Encoding happens after the cluster lock is released.
    let snapshot = cluster.serialize();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!("topology version: {}", cluster.version());

    Ok(())
}
