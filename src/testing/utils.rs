use crate::cluster::{Cluster, Group, NodeGroup};
use crate::config::ClusterConfig;
use crate::types::Node;
use std::cmp::Ordering;
use std::sync::Arc;

/// Install a test subscriber. Ignores the error when one is already set.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("clustermap=debug")
        .with_test_writer()
        .try_init();
}

/// Build a shared cluster with `group_count` empty groups named `g0`, `g1`, ...
pub(crate) fn cluster_with_groups(group_count: usize) -> (Arc<Cluster>, Vec<Arc<Group>>) {
    let cluster = Arc::new(Cluster::new(ClusterConfig::new("scenario")));
    let groups: Vec<_> = (0..group_count)
        .map(|i| Arc::new(Group::new(format!("g{}", i))))
        .collect();

    for group in &groups {
        cluster.add_node_group(group.clone()).unwrap();
    }

    (cluster, groups)
}

pub(crate) fn node(id: impl Into<String>) -> Arc<Node> {
    Arc::new(Node::new(id))
}

/// Assert groups are in non-decreasing natural order.
pub(crate) fn assert_sorted<G: NodeGroup>(groups: &[Arc<G>]) {
    for pair in groups.windows(2) {
        assert_ne!(
            pair[0].order(&pair[1]),
            Ordering::Greater,
            "groups out of order: {} before {}",
            pair[0].id(),
            pair[1].id()
        );
    }
}
